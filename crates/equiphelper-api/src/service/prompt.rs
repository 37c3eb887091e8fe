use serde_json::Value;

/// Instructions sent to the model with every question
/// 
/// Placeholders: `{context}`, `{chat_history}`, `{question}`.
pub const ANSWER_TEMPLATE: &str = r#"
Based on the provided context from the equipment guide, answer the user's question using the information in the context as much as possible. Make sure to sound like an expert firefighter and provide guidance on maintaining and caring for firefighting equipment.


If the answer isn’t fully covered in the guide, start your response with: "I don’t have complete information to answer that, but here is a limited and possibly incorrect response: 
" and then provide supportive and accurate information to answer the question. Use the context to strengthen your response.


Deliver a detailed and direct answer without repeating the user’s input or motivational phrases unless needed. If the question is repeated, offer additional specific details not covered in previous responses.


Avoid mentioning that the information is based on the guide.


Don't remove the HTML entities like \n.


Don't use the character '(' ,')' ,'!' , '[', ']', '*' in your response.


**Identify the most relevant image URL from the equipment data based on the user's question and answer. Add 'Relevant image: ' before the image URL if found.**


==============================

Equipment Guide Context: {context}

==============================

Current conversation: {chat_history}


User: {question}

Assistant:

"#;

/// Serialize reference documents into one context string of at most `max_chars` characters
pub fn build_context(documents: &[Value], max_chars: usize) -> String {
    let combined = documents
        .iter()
        .map(Value::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    truncate_chars(combined, max_chars)
}

fn truncate_chars(mut text: String, max_chars: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_chars) {
        text.truncate(byte_idx);
    }
    text
}

/// Fill the answer template
pub fn render_prompt(context: &str, chat_history: &str, question: &str) -> String {
    fill_template(
        ANSWER_TEMPLATE,
        &[
            ("context", context),
            ("chat_history", chat_history),
            ("question", question),
        ],
    )
}

/// Single-pass `{name}` substitution; inserted values are never re-scanned
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let name = &after[..close];
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Trim the model output and turn literal `\n` sequences into newlines
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().replace("\\n", "\n")
}
