//! Outbound email composition — exercise prompts and feedback bodies.

use crate::exercise::Assignment;

/// Subject prefix on every email the trainer sends.
pub const SUBJECT_PREFIX: &str = "Spanish Verb – ";

/// Subject for the daily exercise email.
pub fn exercise_subject(verb: &str) -> String {
    format!("{SUBJECT_PREFIX}{} (mixed tenses)", verb.to_uppercase())
}

/// Subject for the feedback email.
pub fn feedback_subject(verb: &str) -> String {
    format!("{SUBJECT_PREFIX}Feedback – {}", verb.to_uppercase())
}

/// Plain and HTML bodies for the daily exercise email.
pub fn exercise_body(verb: &str, assignments: &[Assignment]) -> (String, String) {
    let verb_upper = verb.to_uppercase();
    let lines = assignments
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {} ({})", i + 1, a.pronoun, a.tense))
        .collect::<Vec<_>>()
        .join("\n");

    let plain = format!(
        "Daily Spanish Verb Practice\n\n\
         Verb: {verb_upper}\n\n\
         Write ONE sentence for each line (pronoun + tense). Use the verb in the tense shown:\n\n\
         {lines}\n\n\
         Reply directly to this email with your 5 sentences.\n\
         Do not include English.\n"
    );

    let items = assignments
        .iter()
        .map(|a| format!("<li>{} — <strong>{}</strong></li>", a.pronoun, a.tense))
        .collect::<String>();
    let html = format!(
        "<html><body style=\"font-family: sans-serif;\">\n\
         <h2>Daily Spanish Verb Practice</h2>\n\
         <p><strong>Verb:</strong> {verb_upper}</p>\n\
         <p>Write ONE sentence for each line. Use the verb in the tense shown:</p>\n\
         <ol>\n{items}\n</ol>\n\
         <p>Reply directly to this email with your 5 sentences.<br>\n\
         Do not include English.</p>\n\
         </body></html>"
    );

    (plain, html)
}

/// Plain and HTML bodies for the feedback email.
pub fn feedback_body(
    verb: &str,
    sections: &[String],
    conjugation_tables: &str,
    encouragement: &str,
) -> (String, String) {
    let verb_upper = verb.to_uppercase();
    let sections_text = sections.join("\n\n");

    let plain = format!(
        "Corrections – {verb_upper} (mixed tenses)\n\n\
         {sections_text}\n\n\
         Conjugation tables:\n\
         {conjugation_tables}\n\n\
         {encouragement}\n"
    );

    let sections_html = sections
        .iter()
        .map(|s| s.replace('\n', "<br>"))
        .collect::<Vec<_>>()
        .join("<br><br>");
    let tables_html = conjugation_tables.replace('\n', "<br>");
    let encouragement_html = encouragement.replace('\n', "<br>");
    let html = format!(
        "<html><body style=\"font-family: sans-serif;\">\n\
         <h2>Corrections – {verb_upper} (mixed tenses)</h2>\n\
         <p>{sections_html}</p>\n\
         <p><strong>Conjugation tables:</strong></p>\n\
         <p>{tables_html}</p>\n\
         <p>{encouragement_html}</p>\n\
         </body></html>"
    );

    (plain, html)
}
