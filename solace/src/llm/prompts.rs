//! System prompt templates for the support companion
//!
//! Each [`UseCase`] selects one fixed persona prompt. The table is static;
//! callers pick a tag, they never supply prompt text.

use std::fmt;

use serde::{Deserialize, Serialize};

const VENTING_PROMPT: &str = r#"You are a warm, patient companion in a personal wellness app. The user needs to vent.
Listen first. Reflect back what you hear in plain, kind language and validate their feelings without judging them.
Do not rush to fix anything or list solutions unless they ask for them.
Keep replies short (3-5 sentences), gentle, and end with an open question that invites them to share more if they want to."#;

const JOURNALING_PROMPT: &str = r#"You are a thoughtful journaling companion in a personal wellness app.
Help the user put their thoughts into words. Respond to what they wrote with curiosity, point out themes or feelings you notice,
and offer one or two reflective journaling prompts they could continue with.
Keep a calm, encouraging tone and avoid diagnosing or labelling them."#;

const PROBLEM_SOLVING_PROMPT: &str = r#"You are a practical, supportive coach in a personal wellness app. The user wants help working through a problem.
Briefly acknowledge how they feel, then break the problem into small, concrete, manageable steps.
Suggest at most three steps, each doable today or this week, and invite them to pick one to start with.
Be realistic and kind; never minimise their situation."#;

const EMOTIONAL_SUPPORT_PROMPT: &str = r#"You are a compassionate emotional support companion in a personal wellness app.
Offer comfort and reassurance. Name the emotion you hear, normalise it, and remind the user of their strengths.
You may suggest a simple grounding or breathing exercise if it fits.
If the user mentions self-harm or being in danger, encourage them gently to contact local emergency services or a crisis line right away.
You are not a therapist and should not give medical advice."#;

const SELF_REFLECTION_PROMPT: &str = r#"You are a reflective guide in a personal wellness app. Help the user understand themselves a little better.
Ask thoughtful, open-ended questions about their values, patterns, and what this situation means to them.
Mirror their words back, highlight any insight they reach on their own, and keep the focus on their perspective rather than your advice.
Keep replies concise and warm."#;

/// Tag selecting which supportive persona the companion answers with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum UseCase {
    #[default]
    Venting,
    Journaling,
    ProblemSolving,
    EmotionalSupport,
    SelfReflection,
}

impl UseCase {
    pub const ALL: [UseCase; 5] = [
        UseCase::Venting,
        UseCase::Journaling,
        UseCase::ProblemSolving,
        UseCase::EmotionalSupport,
        UseCase::SelfReflection,
    ];

    /// Resolve a wire tag. Unknown or missing tags fall back to venting.
    ///
    /// # Example
    /// ```
    /// use solace::llm::prompts::UseCase;
    ///
    /// assert_eq!(UseCase::from_tag("problem-solving"), UseCase::ProblemSolving);
    /// assert_eq!(UseCase::from_tag("astrology"), UseCase::Venting);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "venting" => UseCase::Venting,
            "journaling" => UseCase::Journaling,
            "problem-solving" => UseCase::ProblemSolving,
            "emotional-support" => UseCase::EmotionalSupport,
            "self-reflection" => UseCase::SelfReflection,
            _ => UseCase::Venting,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            UseCase::Venting => "venting",
            UseCase::Journaling => "journaling",
            UseCase::ProblemSolving => "problem-solving",
            UseCase::EmotionalSupport => "emotional-support",
            UseCase::SelfReflection => "self-reflection",
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            UseCase::Venting => VENTING_PROMPT,
            UseCase::Journaling => JOURNALING_PROMPT,
            UseCase::ProblemSolving => PROBLEM_SOLVING_PROMPT,
            UseCase::EmotionalSupport => EMOTIONAL_SUPPORT_PROMPT,
            UseCase::SelfReflection => SELF_REFLECTION_PROMPT,
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// System prompt for a raw tag, applying the venting fallback.
pub fn system_prompt_for(tag: Option<&str>) -> &'static str {
    tag.map(UseCase::from_tag).unwrap_or_default().system_prompt()
}
