//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve the service and its callers independently.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::domain::{AiJudgment, Direction, Question, RoundResult, SeedAnswer, SubmitParams};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    MatchAnswer(MatchIn),
    ParseJudgment(JudgeParseIn),
    SubmitGuess(GuessIn),
    ScoreRound(ScoreRoundIn),
    ScoreTotal(ScoreTotalIn),
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Match(MatchOut),
    Judgment { judgment: AiJudgment },
    GuessResult(GuessOut),
    RoundScore(ScoreRoundOut),
    TotalScore(ScoreTotalOut),
    Error { message: String },
}

/// Where a guess's rank came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuessSource {
    /// Found in the seed list; the judge was not needed.
    ExactMatch,
    /// The judge accepted the answer and supplied a rank.
    AiJudge,
    /// No exact match and no judge reply supplied yet.
    NeedsJudge,
    /// The judge rejected the answer, gave no rank, or was unintelligible.
    Miss,
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct MatchIn {
    #[serde(default, rename = "questionId")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub seeds: Option<Vec<SeedAnswer>>,
    pub answer: String,
}
#[derive(Debug, Serialize)]
pub struct MatchOut {
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedAnswer>,
}

#[derive(Debug, Deserialize)]
pub struct JudgePromptIn {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub answer: String,
}
#[derive(Debug, Serialize)]
pub struct JudgePromptOut {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Deserialize)]
pub struct JudgeParseIn {
    pub raw: String,
}

#[derive(Debug, Deserialize)]
pub struct GuessIn {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub round: u8,
    #[serde(default, rename = "questionId")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub seeds: Option<Vec<SeedAnswer>>,
    pub answer: String,
    #[serde(default, rename = "answerCount")]
    pub answer_count: Option<i64>,
    #[serde(default, rename = "judgeReply")]
    pub judge_reply: Option<String>,
}
#[derive(Debug, Serialize)]
pub struct GuessOut {
    pub source: GuessSource,
    #[serde(rename = "matchedTo", skip_serializing_if = "Option::is_none")]
    pub matched_to: Option<String>,
    pub result: RoundResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment: Option<AiJudgment>,
    pub submit: SubmitParams,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRoundIn {
    pub round: i64,
    #[serde(default)]
    pub rank: Option<f64>,
    #[serde(default, rename = "answerCount")]
    pub answer_count: Option<i64>,
}
#[derive(Debug, Serialize)]
pub struct ScoreRoundOut {
    pub score: i64,
    pub direction: Direction,
    pub multiplier: i64,
}

#[derive(Debug, Deserialize)]
pub struct ScoreTotalIn {
    pub rounds: Vec<RoundResult>,
}
#[derive(Debug, Serialize)]
pub struct ScoreTotalOut {
    pub total: i64,
}

/// Question summary without the ranked answers. `answerCount` is the count
/// guesses are scored against when a request does not supply one.
#[derive(Debug, Serialize)]
pub struct QuestionOut {
    pub id: String,
    pub prompt: String,
    #[serde(rename = "answerCount")]
    pub answer_count: i64,
}

pub fn to_out(q: &Question, game: &GameConfig) -> QuestionOut {
    QuestionOut { id: q.id.clone(), prompt: q.prompt.clone(), answer_count: game.answer_count }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
