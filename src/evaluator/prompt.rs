//! Evaluation prompt construction.

use crate::exercise::Assignment;

/// Build the instruction prompt for one evaluation: the verb, the expected
/// pronoun+tense per line, and the student's sentences in order.
pub fn build_evaluation_prompt(
    verb: &str,
    assignments: &[Assignment],
    sentences: &[String],
) -> String {
    let assignments_block = assignments
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {} — tense: {}", i + 1, a.pronoun, a.tense))
        .collect::<Vec<_>>()
        .join("\n");
    let sentences_block = sentences
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a strict but kind Spanish teacher. Evaluate the following student sentences.

Verb (infinitive): {verb}

Expected (pronoun and tense for each line, in order):
{assignments_block}

Student's sentences (one per line, in order):
{sentences_block}

Respond with a valid JSON object only, no markdown or extra text. Use this exact structure:

{{
  "results": [
    {{
      "pronoun": "yo",
      "tense": "Future",
      "original": "exact student sentence",
      "correct": true or false,
      "corrected": "corrected sentence if wrong, otherwise same as original",
      "explanation": "brief explanation in simple English if wrong; if correct write 'Correct.'"
    }}
  ],
  "conjugation_tables": {{
    "Future": "yo [form]\ntú [form]\nél/ella [form]\nnosotros/nosotras [form]\nellos/ellas [form]",
    "Preterite": "...",
    "Imperfect": "...",
    "Present": "..."
  }},
  "encouragement": "One short sentence of encouragement or a pattern reminder."
}}

Rules:
- Evaluate strictly: each sentence must match the requested tense AND pronoun for that line.
- Output one entry in "results" per line, in the same order. Include "pronoun" and "tense" in each entry.
- In "conjugation_tables", include ONLY the tenses that appear in the assignments above (one key per tense used). Each value is 5 lines: yo ..., tú ..., él/ella ..., nosotros/nosotras ..., ellos/ellas ...
- If the student gave fewer than 5 sentences, still output 5 entries; use "original": "(missing)" and "correct": false for missing ones, and suggest a correct example in "corrected".
- Keep explanations very brief (one line).
- Output only the JSON object."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::Tense;

    #[test]
    fn prompt_lists_assignments_and_sentences_in_order() {
        let assignments = vec![
            Assignment {
                pronoun: "yo".to_string(),
                tense: Tense::Future,
            },
            Assignment {
                pronoun: "tú".to_string(),
                tense: Tense::Imperfect,
            },
        ];
        let sentences = vec![
            "Yo llevaré el libro.".to_string(),
            "Tú llevabas el bolso.".to_string(),
        ];
        let prompt = build_evaluation_prompt("llevar", &assignments, &sentences);

        assert!(prompt.contains("Verb (infinitive): llevar"));
        assert!(prompt.contains("1. yo — tense: Future"));
        assert!(prompt.contains("2. tú — tense: Imperfect"));
        assert!(prompt.contains("1. Yo llevaré el libro."));
        assert!(prompt.contains("2. Tú llevabas el bolso."));
    }

    #[test]
    fn prompt_requests_a_bare_json_object() {
        let prompt = build_evaluation_prompt("comer", &[], &[]);
        assert!(prompt.contains("valid JSON object only"));
        assert!(prompt.contains("\"conjugation_tables\""));
    }
}
