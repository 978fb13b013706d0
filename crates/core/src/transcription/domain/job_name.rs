use uuid::Uuid;

use crate::shared::constants::MAX_JOB_NAME_LEN;

/// Build a per-run job name from a fresh random id and the media base name.
///
/// Characters the service rejects are replaced with `-`.
pub fn generate_job_name(media_base_name: &str) -> String {
    job_name_with_id(&Uuid::new_v4().to_string(), media_base_name)
}

fn job_name_with_id(id: &str, media_base_name: &str) -> String {
    format!("{id}_{media_base_name}")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .take(MAX_JOB_NAME_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeds_base_name() {
        assert_eq!(job_name_with_id("abc", "talk.mp3"), "abc_talk.mp3");
    }

    #[test]
    fn test_replaces_disallowed_characters() {
        assert_eq!(
            job_name_with_id("abc", "my talk (final).mp3"),
            "abc_my-talk--final-.mp3"
        );
    }

    #[test]
    fn test_truncates_to_service_limit() {
        let long = "x".repeat(500);
        assert_eq!(job_name_with_id("abc", &long).len(), MAX_JOB_NAME_LEN);
    }

    #[test]
    fn test_fresh_name_per_call() {
        assert_ne!(generate_job_name("a.wav"), generate_job_name("a.wav"));
    }

    #[test]
    fn test_generated_name_starts_with_uuid() {
        let name = generate_job_name("a.wav");
        let (id, rest) = name.split_once('_').unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(rest, "a.wav");
    }
}
