use chrono::NaiveDate;
use serde_json::Value;

use super::{
    boolean_value, integer_value, parse_nullable, parse_optional, parse_required, text_value,
    RequestMode,
};
use crate::domain::errors::FieldErrors;
use crate::domain::models::child::{MAX_NAME_LENGTH, MAX_PHOTO_LENGTH};
use crate::domain::models::{Child as DomainChild, ChildChanges, Gender, NewChild};
use shared::{Child as SharedChild, ChildListResponse, ChildRequest, ChildResponse};

/// Mapper to convert between shared Child DTOs and domain Child models.
pub struct ChildMapper;

impl ChildMapper {
    /// Converts a domain Child model to a shared Child DTO.
    pub fn to_dto(domain: DomainChild) -> SharedChild {
        SharedChild {
            id: domain.id,
            name: domain.name,
            gender: domain.gender.as_str().to_string(),
            birthday: domain.birthday.format("%Y-%m-%d").to_string(),
            photo: domain.photo,
            grade: domain.grade,
            is_study: domain.is_study,
        }
    }

    pub fn to_child_list_dto(domain_children: Vec<DomainChild>) -> ChildListResponse {
        ChildListResponse {
            children: domain_children.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_child_response_dto(domain: DomainChild, message: &str) -> ChildResponse {
        ChildResponse {
            child: Self::to_dto(domain),
            success_message: message.to_string(),
        }
    }

    /// Validates a create request and builds the child to store.
    pub fn to_new_child(request: ChildRequest) -> Result<NewChild, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mode = RequestMode::Full;

        let name = parse_required(&mut errors, "name", request.name, mode, parse_name);
        let gender = parse_required(&mut errors, "gender", request.gender, mode, parse_gender);
        let birthday = parse_required(&mut errors, "birthday", request.birthday, mode, parse_birthday);
        let photo = parse_nullable(&mut errors, "photo", request.photo, parse_photo);
        let grade = parse_nullable(&mut errors, "grade", request.grade, parse_grade);
        let is_study = parse_optional(&mut errors, "is_study", request.is_study, boolean_value);

        match (name, gender, birthday) {
            (Some(name), Some(gender), Some(birthday)) if errors.is_empty() => Ok(NewChild {
                name,
                gender,
                birthday,
                photo: photo.flatten().flatten(),
                grade: grade.flatten(),
                is_study: is_study.unwrap_or(false),
            }),
            _ => Err(errors),
        }
    }

    /// Validates an update request and builds the changes to apply.
    ///
    /// A full update that leaves out `is_study` resets it to `false`; photo
    /// and grade keep their stored values when omitted.
    pub fn to_changes(request: ChildRequest, mode: RequestMode) -> Result<ChildChanges, FieldErrors> {
        let mut errors = FieldErrors::new();

        let is_study = parse_optional(&mut errors, "is_study", request.is_study, boolean_value);
        let changes = ChildChanges {
            name: parse_required(&mut errors, "name", request.name, mode, parse_name),
            gender: parse_required(&mut errors, "gender", request.gender, mode, parse_gender),
            birthday: parse_required(&mut errors, "birthday", request.birthday, mode, parse_birthday),
            photo: parse_nullable(&mut errors, "photo", request.photo, parse_photo).map(Option::flatten),
            grade: parse_nullable(&mut errors, "grade", request.grade, parse_grade),
            is_study: match mode {
                RequestMode::Full => Some(is_study.unwrap_or(false)),
                RequestMode::Partial => is_study,
            },
        };

        errors.into_result(changes)
    }
}

fn parse_name(value: &Value) -> Result<String, String> {
    let raw = text_value(value)?;
    let name = raw.trim();
    if name.is_empty() {
        return Err("This field may not be blank.".to_string());
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_NAME_LENGTH
        ));
    }
    Ok(name.to_string())
}

fn parse_gender(value: &Value) -> Result<Gender, String> {
    text_value(value)?.parse()
}

fn parse_birthday(value: &Value) -> Result<NaiveDate, String> {
    const WRONG_FORMAT: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";

    let raw = value.as_str().ok_or_else(|| WRONG_FORMAT.to_string())?;
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| WRONG_FORMAT.to_string())
}

/// An empty photo reference means "no photo"
fn parse_photo(value: &Value) -> Result<Option<String>, String> {
    let raw = text_value(value)?;
    let photo = raw.trim();
    if photo.chars().count() > MAX_PHOTO_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_PHOTO_LENGTH
        ));
    }
    Ok((!photo.is_empty()).then(|| photo.to_string()))
}

fn parse_grade(value: &Value) -> Result<i16, String> {
    let grade = integer_value(value)?;
    i16::try_from(grade).map_err(|_| {
        if grade > 0 {
            format!("Ensure this value is less than or equal to {}.", i16::MAX)
        } else {
            format!("Ensure this value is greater than or equal to {}.", i16::MIN)
        }
    })
}
