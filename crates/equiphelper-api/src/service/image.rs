use serde_json::Value;

use super::reference::ReferenceEntry;

/// Image of the first reference entry whose keywords appear in the question
/// 
/// Matching is a case-insensitive substring test. Scanning stops at the first
/// matching entry, even when that entry carries no image. An empty keyword
/// listed before any real match voids the whole entry.
pub fn find_image_url(documents: &[Value], question: &str) -> Option<String> {
    let question = question.to_lowercase();
    
    for entry in documents.iter().flat_map(ReferenceEntry::all_from_document) {
        let matched = entry
            .keywords
            .iter()
            .find(|keyword| question.contains(&keyword.to_lowercase()));
        
        match matched {
            Some(keyword) if !keyword.is_empty() => {
                tracing::info!(keyword = %keyword, "Matched keyword");
                return entry.image_url;
            }
            _ => continue,
        }
    }
    
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_case_insensitive_match() {
        let docs = vec![json!({"keywords": ["helmet"], "imageUrl": "/PPE Images/helmet.png"})];
        assert_eq!(
            find_image_url(&docs, "How do I clean my Helmet?").as_deref(),
            Some("/PPE Images/helmet.png")
        );
    }

    #[test]
    fn test_no_match_is_none() {
        let docs = vec![
            json!({"keywords": ["helmet"], "imageUrl": "/PPE Images/helmet.png"}),
            json!({"keywords": ["boots"], "imageUrl": "/PPE Images/boots.png"}),
        ];
        assert_eq!(find_image_url(&docs, "How do I wash my hood?"), None);
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let docs = vec![
            json!({"keywords": ["gear"], "imageUrl": "/PPE Images/turnout.png"}),
            json!({"keywords": ["boots"], "imageUrl": "/PPE Images/boots.png"}),
        ];
        assert_eq!(
            find_image_url(&docs, "Which gear goes with my boots?").as_deref(),
            Some("/PPE Images/turnout.png")
        );
    }

    #[test]
    fn test_match_without_image_stops_scanning() {
        let docs = vec![
            json!({"keywords": ["boots"]}),
            json!({"keywords": ["boots"], "imageUrl": "/PPE Images/boots.png"}),
        ];
        assert_eq!(find_image_url(&docs, "boots?"), None);
    }

    #[test]
    fn test_entries_inside_array_document() {
        let docs = vec![json!([
            {"keywords": ["gloves"], "imageUrl": "/PPE Images/gloves.png"},
            {"keywords": ["hood"], "imageUrl": "/PPE Images/hood.png"}
        ])];
        assert_eq!(
            find_image_url(&docs, "How do I store my HOOD").as_deref(),
            Some("/PPE Images/hood.png")
        );
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let docs = vec![json!({"keywords": [""], "imageUrl": "/PPE Images/any.png"})];
        assert_eq!(find_image_url(&docs, "anything"), None);
    }

    #[test]
    fn test_leading_empty_keyword_voids_entry() {
        let docs = vec![
            json!({"keywords": ["", "helmet"], "imageUrl": "/PPE Images/any.png"}),
            json!({"keywords": ["helmet"], "imageUrl": "/PPE Images/helmet.png"}),
        ];
        assert_eq!(
            find_image_url(&docs, "How do I clean my helmet?").as_deref(),
            Some("/PPE Images/helmet.png")
        );

        // Behind a real match the empty keyword is never reached
        let docs = vec![json!({"keywords": ["helmet", ""], "imageUrl": "/PPE Images/helmet.png"})];
        assert_eq!(
            find_image_url(&docs, "helmet").as_deref(),
            Some("/PPE Images/helmet.png")
        );
    }
}
