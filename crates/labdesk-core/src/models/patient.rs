//! Patient models.

use serde::{Deserialize, Serialize};

use super::number::whole_number;

/// Form of address printed on slips and reports.
///
/// Titles this build does not know are kept verbatim in `Unrecognized`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Title {
    #[default]
    Mr,
    Mrs,
    Ms,
    Miss,
    Dr,
    Master,
    Baby,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Title {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Mr => "Mr",
            Self::Mrs => "Mrs",
            Self::Ms => "Ms",
            Self::Miss => "Miss",
            Self::Dr => "Dr",
            Self::Master => "Master",
            Self::Baby => "Baby",
            Self::Unrecognized(title) => title,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Mr" => Some(Self::Mr),
            "Mrs" => Some(Self::Mrs),
            "Ms" => Some(Self::Ms),
            "Miss" => Some(Self::Miss),
            "Dr" => Some(Self::Dr),
            "Master" => Some(Self::Master),
            "Baby" => Some(Self::Baby),
            _ => None,
        }
    }

    /// Known title for `s`, else `Unrecognized(s)`.
    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.to_string()))
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    #[default]
    Other,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Sex {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
            Self::Unrecognized(sex) => sex,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| Self::Unrecognized(s.to_string()))
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered patient.
///
/// Missing fields in an imported document fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Patient {
    /// `p` + creation millis
    pub id: String,
    pub title: Title,
    pub full_name: String,
    pub mobile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "whole_number")]
    pub age: u32,
    pub sex: Sex,
    pub address: String,
    /// Registration date (YYYY-MM-DD)
    pub reg_date: String,
    /// Display label such as `SN0004`; not an identity
    pub slip_no: String,
}

/// Registration data: everything except the store-assigned id and slip number.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub title: Title,
    pub full_name: String,
    pub mobile: String,
    pub email: Option<String>,
    pub age: u32,
    pub sex: Sex,
    pub address: String,
    pub reg_date: String,
}

impl NewPatient {
    /// Registration data dated today, with empty contact details.
    pub fn new(title: Title, full_name: impl Into<String>, age: u32, sex: Sex) -> Self {
        Self {
            title,
            full_name: full_name.into(),
            mobile: String::new(),
            email: None,
            age,
            sex,
            address: String::new(),
            reg_date: super::today(),
        }
    }

    pub(crate) fn into_patient(self, id: String, slip_no: String) -> Patient {
        Patient {
            id,
            title: self.title,
            full_name: self.full_name,
            mobile: self.mobile,
            email: self.email,
            age: self.age,
            sex: self.sex,
            address: self.address,
            reg_date: self.reg_date,
            slip_no,
        }
    }
}

impl Patient {
    /// Name with title, as printed on slips ("Mrs Jane Doe").
    pub fn display_name(&self) -> String {
        format!("{} {}", self.title, self.full_name)
    }
}
