//! Built-in question so the service is useful without external config.

use crate::domain::{Question, SeedAnswer};

pub const DEMO_QUESTION_ID: &str = "demo-hero";

pub fn seed_questions() -> Vec<Question> {
  let answers = [
    "saves", "helps", "rescues", "protects", "fights", "flies", "inspires", "defends",
    "sacrifices", "serves", "leads", "cares", "volunteers", "shields", "gives", "guards",
  ];
  vec![Question {
    id: DEMO_QUESTION_ID.into(),
    prompt: "Name something a hero does".into(),
    answers: answers
      .iter()
      .zip(1..)
      .map(|(a, rank)| SeedAnswer { answer: (*a).into(), rank })
      .collect(),
  }]
}
