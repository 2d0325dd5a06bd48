//! Input-shape guards
//!
//! Checks run before a request is sent. They reject malformed input; the
//! backend stays the authority on everything else.

use chrono::NaiveDate;
use shared::models::{
    ChildCreate, ConsultationCreate, ConsultationUpdate, GoalCreate, GoalStatus, Role, UserCreate,
};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::{ClientError, ClientResult};

/// Strict 24-hour `HH:MM` (two digits each, 00:00 to 23:59)
pub fn is_valid_time(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hour < 24 && minute < 60
}

fn check_time(time: &str) -> ClientResult<()> {
    if is_valid_time(time) {
        Ok(())
    } else {
        Err(ClientError::Validation(format!(
            "Horário inválido \"{time}\": use o formato HH:MM (24h)"
        )))
    }
}

fn check_location(is_in_person: Option<bool>, location: Option<&str>) -> ClientResult<()> {
    let has_location = location.is_some_and(|l| !l.trim().is_empty());
    if is_in_person == Some(true) && !has_location {
        return Err(ClientError::Validation(
            "Local é obrigatório para consultas presenciais".into(),
        ));
    }
    Ok(())
}

/// Guard for `POST /consultations`
pub fn check_consultation_create(payload: &ConsultationCreate) -> ClientResult<()> {
    check_time(&payload.time)?;
    check_location(payload.is_in_person, payload.location.as_deref())?;
    if payload.reason.trim().is_empty() {
        return Err(ClientError::Validation("Motivo é obrigatório".into()));
    }
    if let (Some(start), Some(end)) = (payload.start_at, payload.end_at)
        && end <= start
    {
        return Err(ClientError::Validation(
            "O término deve ser depois do início".into(),
        ));
    }
    Ok(())
}

/// Guard for `PUT /consultations/{id}`; only fields present are checked
pub fn check_consultation_update(payload: &ConsultationUpdate) -> ClientResult<()> {
    if let Some(time) = &payload.time {
        check_time(time)?;
    }
    check_location(payload.is_in_person, payload.location.as_deref())?;
    if let (Some(start), Some(end)) = (payload.start_at, payload.end_at)
        && end <= start
    {
        return Err(ClientError::Validation(
            "O término deve ser depois do início".into(),
        ));
    }
    Ok(())
}

/// Progress is a percentage
pub fn check_progress(progress: u8) -> ClientResult<()> {
    if progress > 100 {
        return Err(ClientError::Validation(format!(
            "Progresso deve estar entre 0 e 100 (recebido {progress})"
        )));
    }
    Ok(())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Campo obrigatório".into());
        return Err(err);
    }
    Ok(())
}

/// Flatten validator errors into one line, fields in name order
pub fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{field}: {msg}"),
                None => format!("{field}: {}", e.code),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Create-user form, including the confirmation field the API never sees
#[derive(Debug, Clone, Validate)]
pub struct UserForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    #[validate(email(message = "Email inválido"))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "As senhas não coincidem"))]
    pub confirm_password: String,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<String>,
    pub role: Role,
}

impl UserForm {
    /// Validate and build the API payload
    pub fn into_payload(self) -> ClientResult<UserCreate> {
        self.validate()?;
        Ok(UserCreate {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            birthdate: self.birthdate,
            gender: self.gender.filter(|g| !g.trim().is_empty()),
            role: self.role,
        })
    }
}

/// Create-child form
#[derive(Debug, Clone, Validate)]
pub struct ChildForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub birthdate: NaiveDate,
    pub gender: Option<String>,
    pub parent_id: Option<i64>,
    pub psychologist_id: Option<i64>,
}

impl ChildForm {
    pub fn into_payload(self) -> ClientResult<ChildCreate> {
        self.validate()?;
        let parent_id = self
            .parent_id
            .ok_or_else(|| ClientError::Validation("parent_id: Selecione o responsável".into()))?;
        Ok(ChildCreate {
            name: self.name.trim().to_string(),
            birthdate: self.birthdate,
            gender: self.gender,
            parent_id,
            psychologist_id: self.psychologist_id,
        })
    }
}

/// Create-goal form
#[derive(Debug, Clone, Validate)]
pub struct GoalForm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub consultation_id: i64,
    pub category_id: Option<i64>,
    #[validate(range(max = 100, message = "Progresso deve estar entre 0 e 100"))]
    pub progress: u8,
}

impl GoalForm {
    pub fn into_payload(self) -> ClientResult<GoalCreate> {
        self.validate()?;
        Ok(GoalCreate {
            title: self.title.trim().to_string(),
            description: self.description.filter(|d| !d.trim().is_empty()),
            status: GoalStatus::from_progress(self.progress),
            due_date: self.due_date,
            consultation_id: self.consultation_id,
            category_id: self.category_id,
            progress: self.progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consultation() -> ConsultationCreate {
        ConsultationCreate {
            date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
            time: "09:30".into(),
            reason: "Primeira consulta".into(),
            notes: None,
            child_id: 1,
            psychologist_id: 2,
            start_at: None,
            end_at: None,
            is_in_person: None,
            location: None,
        }
    }

    fn user_form() -> UserForm {
        UserForm {
            name: "Joana".into(),
            email: "joana@example.com".into(),
            password: "segredo1".into(),
            confirm_password: "segredo1".into(),
            phone: Some(" ".into()),
            birthdate: None,
            gender: None,
            role: Role::Parent,
        }
    }

    #[test]
    fn test_time_format() {
        for ok in ["00:00", "09:05", "23:59", "12:00"] {
            assert!(is_valid_time(ok), "{ok}");
        }
        for bad in ["24:00", "9:05", "12:60", "12-00", "1200", "ab:cd", "12:0", " 12:00", ""] {
            assert!(!is_valid_time(bad), "{bad}");
        }
    }

    #[test]
    fn test_consultation_time_guard() {
        let mut c = consultation();
        assert!(check_consultation_create(&c).is_ok());
        c.time = "25:00".into();
        assert!(matches!(check_consultation_create(&c), Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_in_person_requires_location() {
        let mut c = consultation();
        c.is_in_person = Some(true);
        assert!(check_consultation_create(&c).is_err());
        c.location = Some("  ".into());
        assert!(check_consultation_create(&c).is_err());
        c.location = Some("Sala 2".into());
        assert!(check_consultation_create(&c).is_ok());
        c.is_in_person = Some(false);
        c.location = None;
        assert!(check_consultation_create(&c).is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let mut c = consultation();
        c.start_at = Some("2024-09-02T10:00:00Z".parse().unwrap());
        c.end_at = Some("2024-09-02T09:00:00Z".parse().unwrap());
        assert!(check_consultation_create(&c).is_err());
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        assert!(check_consultation_update(&ConsultationUpdate::default()).is_ok());
        let update = ConsultationUpdate {
            time: Some("7:00".into()),
            ..Default::default()
        };
        assert!(check_consultation_update(&update).is_err());
        let update = ConsultationUpdate {
            is_in_person: Some(true),
            ..Default::default()
        };
        assert!(check_consultation_update(&update).is_err());
    }

    #[test]
    fn test_user_form_ok() {
        let payload = user_form().into_payload().unwrap();
        assert_eq!(payload.phone, None);
        assert_eq!(payload.role, Role::Parent);
    }

    #[test]
    fn test_user_form_password_mismatch() {
        let mut form = user_form();
        form.confirm_password = "outra".into();
        match form.into_payload() {
            Err(ClientError::Validation(msg)) => {
                assert!(msg.contains("confirm_password"), "{msg}");
                assert!(msg.contains("As senhas não coincidem"), "{msg}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_user_form_blank_name_and_bad_email() {
        let mut form = user_form();
        form.name = "   ".into();
        form.email = "not-an-email".into();
        let msg = match form.into_payload() {
            Err(ClientError::Validation(msg)) => msg,
            other => panic!("unexpected {other:?}"),
        };
        let email_at = msg.find("email").unwrap();
        let name_at = msg.find("name").unwrap();
        assert!(email_at < name_at);
    }

    #[test]
    fn test_child_form_requires_parent() {
        let form = ChildForm {
            name: "Rafa".into(),
            birthdate: NaiveDate::from_ymd_opt(2019, 4, 1).unwrap(),
            gender: None,
            parent_id: None,
            psychologist_id: None,
        };
        assert!(form.into_payload().is_err());
    }

    #[test]
    fn test_goal_form_status_from_progress() {
        let form = GoalForm {
            title: "Ler em voz alta".into(),
            description: Some(String::new()),
            due_date: None,
            consultation_id: 3,
            category_id: None,
            progress: 40,
        };
        let payload = form.clone().into_payload().unwrap();
        assert_eq!(payload.status, GoalStatus::InProgress);
        assert_eq!(payload.description, None);

        let mut over = form;
        over.progress = 120;
        assert!(over.into_payload().is_err());
        assert!(check_progress(101).is_err());
        assert!(check_progress(100).is_ok());
    }
}
