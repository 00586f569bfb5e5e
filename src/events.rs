//! Typed payloads exchanged with the host process. The transport itself is
//! not ours; both directions share the `{"action": ..., "data": ...}` shape.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// Payload of the `startSkillCheck` action. `difficulty` accepts either a
/// single entry or an ordered list of per-stage entries; `inputs` is the
/// optional pool of candidate keys the expected key is drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSkillCheck {
    pub difficulty: OneOrMany<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<String>>,
}

/// Wire helper: a bare value or a list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T> From<T> for OneOrMany<T> {
    fn from(value: T) -> Self {
        OneOrMany::One(value)
    }
}

/// Inbound host event, tagged by action name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", content = "data")]
pub enum HostEvent {
    #[serde(rename = "startSkillCheck")]
    StartSkillCheck(StartSkillCheck),
    #[serde(rename = "skillCheckCancel")]
    SkillCheckCancel,
}

/// Terminal result of one session; sent exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCheckOver {
    pub success: bool,
}

/// Outbound message to the host, mirroring the inbound envelope shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", content = "data")]
pub enum OutboundMessage {
    #[serde(rename = "skillCheckOver")]
    SkillCheckOver(SkillCheckOver),
}
