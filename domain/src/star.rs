//! STAR method (Situation, Task, Action, Result) coverage of an answer.

use crate::error::{Collaborator, Error};
use crate::round_to;
use log::*;
use media_ai::traits::star::Provider;
use media_ai::types::star::StarLabel;
use serde::Serialize;

/// Share of classified sentences per STAR category, in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StarPercentages {
    pub action: f64,
    pub result: f64,
    pub situation: f64,
    pub task: f64,
}

impl StarPercentages {
    fn all_present(&self) -> bool {
        self.action > 0.0 && self.result > 0.0 && self.situation > 0.0 && self.task > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarScores {
    /// Every STAR category appears at least once.
    pub fulfilled_star: bool,
    pub percentages: StarPercentages,
    pub classifications: Vec<(String, StarLabel)>,
}

/// Classifies every sentence of `text` and summarizes the STAR coverage.
///
/// Sentences are the `.`-separated pieces of the text; empty pieces are skipped.
/// Any classifier failure aborts the analysis.
pub async fn predict_star_scores(text: &str, classifier: &dyn Provider) -> Result<StarScores, Error> {
    let mut classifications = Vec::new();
    for sentence in text.split('.').filter(|s| !s.trim().is_empty()) {
        let label = classifier
            .classify(sentence)
            .await
            .map_err(|e| Error::collaborator(Collaborator::StarClassifier, e))?;
        trace!("STAR label {label} for {sentence:?}");
        classifications.push((sentence.to_string(), label));
    }

    let count = |wanted: StarLabel| classifications.iter().filter(|(_, l)| *l == wanted).count();
    let total = classifications.len();
    let percent = |n: usize| {
        if total == 0 {
            0.0
        } else {
            round_to(n as f64 / total as f64 * 100.0, 2)
        }
    };
    let percentages = StarPercentages {
        action: percent(count(StarLabel::Action)),
        result: percent(count(StarLabel::Result)),
        situation: percent(count(StarLabel::Situation)),
        task: percent(count(StarLabel::Task)),
    };
    debug!("STAR percentages over {total} sentences: {percentages:?}");

    Ok(StarScores {
        fulfilled_star: percentages.all_present(),
        percentages,
        classifications,
    })
}

/// Improvement advice for each under-represented STAR category.
pub fn percentage_feedback(percentages: &StarPercentages) -> Vec<String> {
    let mut feedback = Vec::new();
    if percentages.all_present() {
        feedback.push("You have fulfilled all of the parts of the STAR method. Well done!".to_string());
    }
    if percentages.action < 60.0 {
        feedback.push(format!(
            "You need to work on the Action category. Percentage of your response that is Action: {}. \
             Focus on what you did and how you did it; Action is expected to be about 60% of your response.",
            percentages.action
        ));
    }
    if percentages.result < 15.0 {
        feedback.push(format!(
            "You need to work on the Result category. Percentage of your response that is Result: {}. \
             Focus on the outcomes of your task or action; Result is expected to be about 15% of your response.",
            percentages.result
        ));
    }
    if percentages.situation < 15.0 {
        feedback.push(format!(
            "You need to work on the Situation category. Percentage of your response that is Situation: {}. \
             Describe the context and circumstances that led to the task; Situation is expected to be about 15% of your response.",
            percentages.situation
        ));
    }
    if percentages.task < 10.0 {
        feedback.push(format!(
            "You need to work on the Task category. Percentage of your response that is Task: {}. \
             Focus on the task itself; Task is expected to be about 10% of your response.",
            percentages.task
        ));
    }
    feedback
}
