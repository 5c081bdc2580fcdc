use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::export_user;
use crate::model::{UserRecord, UserRole};

pub fn export(name: &str, email: &str, role: UserRole) -> Result<CmdResult> {
    let user = UserRecord::new(name.trim(), email.trim(), role)?;
    Ok(CmdResult::default()
        .with_export_json(export_user(&user)?)
        .with_message(CmdMessage::success(format!("User record for {} ready", user.name))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn export_carries_role_and_created_at() {
        let result = export("Ann", "ann@example.com", UserRole::Editor).unwrap();
        let json: Value = serde_json::from_str(result.export_json.as_deref().unwrap()).unwrap();
        assert_eq!(json["role"], "Editor");
        assert!(json["createdAt"].as_str().is_some());
        assert!(json["id"].as_str().unwrap().parse::<i64>().is_ok());
    }

    #[test]
    fn export_requires_email() {
        assert!(export("Ann", " ", UserRole::Admin).is_err());
    }
}
