// src/specs/response.rs
//
// Reads one response block, wherever the dialect found it:
//
//   <em class="correct_response">Paris</em>
//   <table><tr><td class="wrong">Amy</td><td class="right">Ben</td></tr></table>
//
// Final-round blocks interleave each responder with a wager cell:
//
//   <tr><td class="wrong">Amy</td><td rowspan="2">What is Lyon?</td></tr>
//   <tr><td>$3,000</td></tr>

use crate::config::consts::TRIPLE_STUMPER;
use crate::core::Element;
use crate::core::sanitize::parse_money;
use crate::model::Attempt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseBlock {
    pub correct_response: Option<String>,
    /// In the order the transcript lists them.
    pub attempts: Vec<Attempt>,
    /// The page's explicit "Triple Stumper" entry was present.
    pub stumper_marker: bool,
}

impl ResponseBlock {
    pub fn any_correct(&self) -> bool {
        self.attempts.iter().any(|a| a.was_correct)
    }
}

/// Walk `root`'s cells in document order. With `with_wagers`, a plain dollar
/// cell after a responder becomes that responder's wager.
pub fn read(root: Element<'_>, with_wagers: bool) -> ResponseBlock {
    let mut block = ResponseBlock {
        correct_response: root
            .find_class("em", "correct_response")
            .map(|em| em.text())
            .filter(|t| !t.is_empty()),
        ..ResponseBlock::default()
    };

    for td in root.descendants().filter(|e| e.is("td")) {
        let right = td.has_class("right");
        if right || td.has_class("wrong") {
            let name = td.text();
            if name.eq_ignore_ascii_case(TRIPLE_STUMPER) {
                block.stumper_marker = true;
            } else if !name.is_empty() {
                block.attempts.push(Attempt { responder: name, was_correct: right, wager: None });
            }
            continue;
        }
        // Response-text cells span two rows; wager cells never do.
        if !with_wagers || td.attr("rowspan").is_some() {
            continue;
        }
        if let Some(wager) = parse_money(&td.text()) {
            if let Some(last) = block.attempts.last_mut() {
                if last.wager.is_none() {
                    last.wager = Some(wager);
                }
            }
        }
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Document;

    #[test]
    fn reads_regular_block_in_order() {
        let doc = Document::parse(r#"
            <td id="clue_J_1_1_r"><em class="correct_response">Paris</em><br />
              <table width="100%"><tr><td class="wrong">Amy</td><td class="wrong">Cal</td><td class="right">Ben</td></tr></table>
            </td>
        "#);
        let block = read(doc.root(), false);
        assert_eq!(block.correct_response.as_deref(), Some("Paris"));
        let names: Vec<&str> = block.attempts.iter().map(|a| a.responder.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Cal", "Ben"]);
        assert!(block.any_correct());
        assert!(block.attempts.iter().all(|a| a.wager.is_none()));
    }

    #[test]
    fn triple_stumper_marker_is_not_an_attempt() {
        let doc = Document::parse(r#"
            <em class="correct_response">Oslo</em>
            <table><tr><td class="wrong">Amy</td><td class="wrong">Triple Stumper</td></tr></table>
        "#);
        let block = read(doc.root(), false);
        assert!(block.stumper_marker);
        assert_eq!(block.attempts.len(), 1);
        assert!(!block.any_correct());
    }

    #[test]
    fn final_block_pairs_wagers_with_responders() {
        let doc = Document::parse(r#"
            <table>
              <tr><td class="wrong">Amy</td><td rowspan="2" valign="top">What is $5 bill?</td></tr>
              <tr><td>$3,000</td></tr>
              <tr><td class="right">Ben</td><td rowspan="2" valign="top">What is Paris?</td></tr>
              <tr><td>$10,000</td></tr>
              <tr><td class="right">Cal</td><td rowspan="2" valign="top">Paris</td></tr>
              <tr><td>$0</td></tr>
            </table>
            <em class="correct_response">Paris</em>
        "#);
        let block = read(doc.root(), true);
        let got: Vec<(&str, bool, Option<i64>)> = block
            .attempts
            .iter()
            .map(|a| (a.responder.as_str(), a.was_correct, a.wager))
            .collect();
        assert_eq!(got, vec![
            ("Amy", false, Some(3000)),
            ("Ben", true, Some(10000)),
            ("Cal", true, Some(0)),
        ]);
    }
}
