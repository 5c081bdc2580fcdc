use super::{CmdMessage, CmdResult};
use crate::error::{CareError, Result};
use crate::export::export_faqs;
use crate::lists::{move_at, remove_at, Direction};
use crate::model::Faq;

pub fn add(faqs: &mut Vec<Faq>, question: &str, answer: &str) -> Result<CmdResult> {
    let faq = Faq::new(question.trim(), answer.trim())?;
    faqs.push(faq);
    Ok(CmdResult::default()
        .with_faqs(faqs.clone())
        .with_message(CmdMessage::success(format!("Added FAQ {}", faqs.len()))))
}

pub fn remove(faqs: &mut Vec<Faq>, index: usize) -> Result<CmdResult> {
    if !remove_at(faqs, index) {
        return Err(CareError::NotFound(format!("FAQ {}", index + 1)));
    }
    Ok(CmdResult::default()
        .with_faqs(faqs.clone())
        .with_message(CmdMessage::success(format!("Removed FAQ {}", index + 1))))
}

pub fn move_item(faqs: &mut [Faq], index: usize, direction: Direction) -> Result<CmdResult> {
    let message = if move_at(faqs, index, direction) {
        CmdMessage::success(format!("Moved FAQ {}", index + 1))
    } else {
        CmdMessage::info(format!("FAQ {} cannot move further; nothing changed", index + 1))
    };
    Ok(CmdResult::default()
        .with_faqs(faqs.to_vec())
        .with_message(message))
}

pub fn export(faqs: &[Faq]) -> Result<CmdResult> {
    if faqs.is_empty() {
        return Err(CareError::validation("No FAQs to export"));
    }
    Ok(CmdResult::default()
        .with_export_json(export_faqs(faqs)?)
        .with_message(CmdMessage::success(format!("{} FAQs ready", faqs.len()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn add_appends_trimmed() {
        let mut faqs = Vec::new();
        add(&mut faqs, " Visiting hours? ", "Any time").unwrap();
        assert_eq!(faqs[0].question, "Visiting hours?");
    }

    #[test]
    fn add_requires_both_parts() {
        let mut faqs = Vec::new();
        assert!(add(&mut faqs, "Parking?", "  ").is_err());
        assert!(faqs.is_empty());
    }

    #[test]
    fn remove_out_of_range_is_not_found() {
        let mut faqs = vec![Faq::new("a", "b").unwrap()];
        assert!(matches!(remove(&mut faqs, 3), Err(CareError::NotFound(_))));
        assert_eq!(faqs.len(), 1);
    }

    #[test]
    fn move_down_swaps() {
        let mut faqs = vec![Faq::new("a", "1").unwrap(), Faq::new("b", "2").unwrap()];
        move_item(&mut faqs, 0, Direction::Down).unwrap();
        assert_eq!(faqs[0].question, "b");
    }

    #[test]
    fn export_is_a_json_array() {
        let faqs = vec![Faq::new("Parking?", "Yes, on site").unwrap()];
        let result = export(&faqs).unwrap();
        let json: Value = serde_json::from_str(result.export_json.as_deref().unwrap()).unwrap();
        assert_eq!(json[0]["answer"], "Yes, on site");
    }

    #[test]
    fn empty_export_is_refused() {
        assert!(export(&[]).is_err());
    }
}
