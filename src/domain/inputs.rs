//! Clinical input record for the liver cirrhosis risk form.
//!
//! Every value is kept as free-form text until it is validated; only the
//! presence of the required fields is checked before an analysis starts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// Fields that must be non-empty before a submission can proceed.
pub const REQUIRED_FIELDS: [Field; 4] = [Field::Age, Field::Gender, Field::Albumin, Field::Bilirubin];

/// A recognised form field, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    Gender,
    Albumin,
    Bilirubin,
    AlkalinePhosphatase,
    AlanineAminotransferase,
    AspartateAminotransferase,
    Cholesterol,
    Cholinesterase,
    Creatinine,
    GammaGlutamylTransferase,
    Protein,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 12] = [
        Field::Age,
        Field::Gender,
        Field::Albumin,
        Field::Bilirubin,
        Field::AlkalinePhosphatase,
        Field::AlanineAminotransferase,
        Field::AspartateAminotransferase,
        Field::Cholesterol,
        Field::Cholinesterase,
        Field::Creatinine,
        Field::GammaGlutamylTransferase,
        Field::Protein,
    ];

    /// Wire name (camelCase), as used in serialized inputs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::Albumin => "albumin",
            Self::Bilirubin => "bilirubin",
            Self::AlkalinePhosphatase => "alkalinePhosphatase",
            Self::AlanineAminotransferase => "alanineAminotransferase",
            Self::AspartateAminotransferase => "aspartateAminotransferase",
            Self::Cholesterol => "cholesterol",
            Self::Cholinesterase => "cholinesterase",
            Self::Creatinine => "creatinine",
            Self::GammaGlutamylTransferase => "gammaGlutamylTransferase",
            Self::Protein => "protein",
        }
    }

    /// Short label for the form.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::Gender => "Gender",
            Self::Albumin => "Albumin",
            Self::Bilirubin => "Bilirubin",
            Self::AlkalinePhosphatase => "Alkaline Phosphatase",
            Self::AlanineAminotransferase => "ALT",
            Self::AspartateAminotransferase => "AST",
            Self::Cholesterol => "Cholesterol",
            Self::Cholinesterase => "Cholinesterase",
            Self::Creatinine => "Creatinine",
            Self::GammaGlutamylTransferase => "GGT",
            Self::Protein => "Total Protein",
        }
    }

    /// Measurement unit, if any.
    #[must_use]
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Self::Age | Self::Gender => None,
            Self::Albumin | Self::Protein => Some("g/dL"),
            Self::Bilirubin | Self::Cholesterol | Self::Creatinine => Some("mg/dL"),
            Self::AlkalinePhosphatase
            | Self::AlanineAminotransferase
            | Self::AspartateAminotransferase
            | Self::Cholinesterase
            | Self::GammaGlutamylTransferase => Some("U/L"),
        }
    }

    /// Placeholder shown while the field is empty (reference range).
    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            Self::Age => "Enter age",
            Self::Gender => "Select gender",
            Self::Albumin => "3.5-5.0",
            Self::Bilirubin => "0.3-1.2",
            Self::AlkalinePhosphatase => "44-147",
            Self::AlanineAminotransferase => "7-56",
            Self::AspartateAminotransferase => "10-40",
            Self::Cholesterol => "120-200",
            Self::Cholinesterase => "5320-12920",
            Self::Creatinine => "0.6-1.2",
            Self::GammaGlutamylTransferase => "9-48",
            Self::Protein => "6.0-8.3",
        }
    }

    #[must_use]
    pub fn is_required(self) -> bool {
        REQUIRED_FIELDS.contains(&self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a field name does not match any [`Field`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Selectable gender values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Next option for a selector cycling `"" -> male -> female -> ""`.
    #[must_use]
    pub fn cycle(current: &str) -> &'static str {
        match current.parse::<Gender>() {
            Err(_) => Self::Male.as_str(),
            Ok(Self::Male) => Self::Female.as_str(),
            Ok(Self::Female) => "",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(UnknownField(other.to_string())),
        }
    }
}

/// Submission rejected because required fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", format_fields(.missing))]
pub struct ValidationError {
    /// Missing fields, in form order.
    pub missing: Vec<Field>,
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw form values. All fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalInputs {
    pub age: String,
    pub gender: String,
    pub albumin: String,
    pub alkaline_phosphatase: String,
    pub alanine_aminotransferase: String,
    pub aspartate_aminotransferase: String,
    pub bilirubin: String,
    pub cholinesterase: String,
    pub cholesterol: String,
    pub creatinine: String,
    pub gamma_glutamyl_transferase: String,
    pub protein: String,
}

impl ClinicalInputs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Albumin => &self.albumin,
            Field::Bilirubin => &self.bilirubin,
            Field::AlkalinePhosphatase => &self.alkaline_phosphatase,
            Field::AlanineAminotransferase => &self.alanine_aminotransferase,
            Field::AspartateAminotransferase => &self.aspartate_aminotransferase,
            Field::Cholesterol => &self.cholesterol,
            Field::Cholinesterase => &self.cholinesterase,
            Field::Creatinine => &self.creatinine,
            Field::GammaGlutamylTransferase => &self.gamma_glutamyl_transferase,
            Field::Protein => &self.protein,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::Albumin => &mut self.albumin,
            Field::Bilirubin => &mut self.bilirubin,
            Field::AlkalinePhosphatase => &mut self.alkaline_phosphatase,
            Field::AlanineAminotransferase => &mut self.alanine_aminotransferase,
            Field::AspartateAminotransferase => &mut self.aspartate_aminotransferase,
            Field::Cholesterol => &mut self.cholesterol,
            Field::Cholinesterase => &mut self.cholinesterase,
            Field::Creatinine => &mut self.creatinine,
            Field::GammaGlutamylTransferase => &mut self.gamma_glutamyl_transferase,
            Field::Protein => &mut self.protein,
        }
    }

    /// Overwrite a single field. The previous buffer is wiped first.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = self.slot_mut(field);
        slot.zeroize();
        *slot = value.into();
    }

    /// Required fields that are empty (whitespace counts as empty).
    #[must_use]
    pub fn missing_required(&self) -> Vec<Field> {
        REQUIRED_FIELDS
            .into_iter()
            .filter(|&field| self.get(field).trim().is_empty())
            .collect()
    }

    /// Check that every required field is present.
    ///
    /// # Errors
    /// Returns the list of missing fields.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Wipe all buffers and leave every field empty.
    pub fn clear(&mut self) {
        self.zeroize();
    }

    /// Example patient used by the form's sample-data shortcut.
    #[must_use]
    pub fn sample() -> Self {
        let mut inputs = Self::new();
        for (field, value) in [
            (Field::Age, "45"),
            (Field::Gender, "male"),
            (Field::Albumin, "4.0"),
            (Field::Bilirubin, "0.8"),
            (Field::AlkalinePhosphatase, "85"),
            (Field::AlanineAminotransferase, "32"),
            (Field::AspartateAminotransferase, "28"),
            (Field::Cholesterol, "180"),
        ] {
            inputs.set(field, value);
        }
        inputs
    }
}

impl Zeroize for ClinicalInputs {
    fn zeroize(&mut self) {
        for field in Field::ALL {
            self.slot_mut(field).zeroize();
        }
    }
}
