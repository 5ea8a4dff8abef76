//! Child domain model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_PHOTO_LENGTH: usize = 100;

/// Gender of a child.
///
/// Stored and exchanged by label only. Earlier data models disagreed on
/// whether `0` meant male or female, so no numeric code is defined here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("\"{}\" is not a valid choice.", other)),
        }
    }
}

/// Domain model representing a child in the daycare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: i64,
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub photo: Option<String>,
    pub grade: Option<i16>,
    pub is_study: bool,
}

/// A child that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewChild {
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub photo: Option<String>,
    pub grade: Option<i16>,
    pub is_study: bool,
}

/// Changes to apply to a stored child. `None` keeps the current value;
/// for nullable fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildChanges {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<NaiveDate>,
    pub photo: Option<Option<String>>,
    pub grade: Option<Option<i16>>,
    pub is_study: Option<bool>,
}

impl Child {
    /// Attach a storage id to a new child
    pub fn from_new(id: i64, new: NewChild) -> Self {
        Self {
            id,
            name: new.name,
            gender: new.gender,
            birthday: new.birthday,
            photo: new.photo,
            grade: new.grade,
            is_study: new.is_study,
        }
    }

    /// Return a copy of this child with `changes` applied
    pub fn apply(&self, changes: ChildChanges) -> Self {
        Self {
            id: self.id,
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            gender: changes.gender.unwrap_or(self.gender),
            birthday: changes.birthday.unwrap_or(self.birthday),
            photo: changes.photo.unwrap_or_else(|| self.photo.clone()),
            grade: changes.grade.unwrap_or(self.grade),
            is_study: changes.is_study.unwrap_or(self.is_study),
        }
    }
}
