//! Context classifier
//!
//! Maps `(step, token)` to a [`Classification`] by walking an ordered rule
//! table. The first rule whose predicate holds wins; there is no
//! backtracking. Anything no rule claims is [`Context::Unrecognized`].

use super::context::{Classification, Context};
use crate::session::Step;

/// Where a rule takes its context from
#[derive(Debug, Clone, Copy)]
pub enum RuleContext {
    Fixed(Context),
    /// The token is itself a control token naming the context
    ControlToken,
}

/// One entry of the classifier table
#[derive(Debug, Clone, Copy)]
pub struct ClassifierRule {
    pub name: &'static str,
    pub context: RuleContext,
    pub actionable: bool,
    matches: fn(Option<&Step>, &str) -> bool,
}

impl ClassifierRule {
    /// Whether this rule claims the event
    pub fn matches(&self, step: Option<&Step>, token: &str) -> bool {
        (self.matches)(step, token)
    }

    fn resolve(&self, token: &str) -> Context {
        match self.context {
            RuleContext::Fixed(context) => context,
            RuleContext::ControlToken => {
                Context::from_control_token(token).unwrap_or(Context::Unrecognized)
            }
        }
    }
}

fn is_room_pending(step: Option<&Step>) -> bool {
    matches!(step, Some(Step::RoomPending))
}

fn is_last_candidate(step: Option<&Step>) -> bool {
    step.is_some_and(Step::is_last_candidate)
}

fn is_done(step: Option<&Step>) -> bool {
    matches!(step, Some(Step::Done))
}

/// Classifier rules in priority order
pub static RULES: [ClassifierRule; 9] = [
    ClassifierRule {
        name: "start",
        context: RuleContext::Fixed(Context::Start),
        actionable: false,
        matches: |_, token| token == "/start",
    },
    ClassifierRule {
        name: "about",
        context: RuleContext::Fixed(Context::About),
        actionable: false,
        matches: |_, token| token == "/about",
    },
    ClassifierRule {
        name: "control-token",
        context: RuleContext::ControlToken,
        actionable: true,
        matches: |_, token| Context::from_control_token(token).is_some(),
    },
    ClassifierRule {
        name: "join-room",
        context: RuleContext::Fixed(Context::JoinRoom),
        actionable: true,
        matches: |step, token| token.chars().count() == 3 && is_room_pending(step),
    },
    ClassifierRule {
        name: "discard",
        context: RuleContext::Fixed(Context::Discard),
        actionable: true,
        matches: |step, token| token.contains("discard") && !is_last_candidate(step),
    },
    ClassifierRule {
        name: "like",
        context: RuleContext::Fixed(Context::Like),
        actionable: true,
        matches: |step, token| token.contains("like") && !is_last_candidate(step),
    },
    ClassifierRule {
        name: "choice-made",
        context: RuleContext::Fixed(Context::ChoiceMade),
        actionable: true,
        matches: |step, token| is_last_candidate(step) || token == "choice-made",
    },
    ClassifierRule {
        name: "show-result",
        context: RuleContext::Fixed(Context::ShowResult),
        actionable: false,
        matches: |step, token| token == "show-result" && is_done(step),
    },
    ClassifierRule {
        name: "end",
        context: RuleContext::Fixed(Context::End),
        actionable: true,
        matches: |step, token| token == "end" && is_done(step),
    },
];

/// Classify an inbound token
///
/// `step` is `None` when the participant has no session record. The function
/// is total: every input yields exactly one classification.
///
/// ```
/// use pickflick_domain::{Context, Step, classify};
///
/// let c = classify(Some(&Step::RoomPending), "a7x");
/// assert_eq!(c.context, Context::JoinRoom);
/// assert!(c.actionable);
///
/// let c = classify(Some(&Step::Voting(10)), "like-10");
/// assert_eq!(c.context, Context::ChoiceMade);
/// ```
pub fn classify(step: Option<&Step>, token: &str) -> Classification {
    RULES
        .iter()
        .find(|rule| rule.matches(step, token))
        .map(|rule| Classification::new(rule.resolve(token), rule.actionable))
        .unwrap_or_else(Classification::unrecognized)
}
