//! Wizard dialogue selection.
//!
//! Greetings and completions are drawn at random from fixed pools using the
//! caller's random source. Onboarding, intervention and status messages are
//! exact lookups and never random.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{
    InterventionKey, MessageCategory, MessageRequest, OnboardingStage, Status, Tone,
    WizardMessage,
};

type Line = (&'static str, Tone);

const STABLE_GREETINGS: [Line; 4] = [
    ("The road ahead is clear. What shall we build today?", Tone::Encouraging),
    ("All systems calm in the Emerald City. Pick one thing and begin.", Tone::Neutral),
    ("Your companions are rested. A good day for your planet project.", Tone::Encouraging),
    ("Welcome back, traveler. The yellow brick road is swept clean.", Tone::Neutral),
];

const ELEVATED_GREETINGS: [Line; 4] = [
    ("A few clouds over Oz. Let's close a loop before opening a new one.", Tone::Neutral),
    ("You're carrying a bit more than usual. One task at a time.", Tone::Calming),
    ("The Scarecrow is thinking hard. Maybe process a brain dump first?", Tone::Neutral),
    ("Steady now. Finishing beats starting today.", Tone::Encouraging),
];

const CRITICAL_GREETINGS: [Line; 4] = [
    ("The winds are picking up. Let's protect your planet project.", Tone::Warning),
    ("Your RAM is running hot. No new projects until something lands.", Tone::Warning),
    ("Breathe. Pick the smallest task that moves anything forward.", Tone::Calming),
    ("The Tin Man's heart is heavy. Be gentle with yourself today.", Tone::Calming),
];

const OVERLOAD_GREETINGS: [Line; 4] = [
    ("Tornado warning! Everything new waits. Only the next small step.", Tone::Warning),
    ("You are in overload. Let's set things down, not pick more up.", Tone::Calming),
    ("Even Dorothy rested in the poppy field. Take five, then one task.", Tone::Calming),
    ("Too many orbits at once. Let's archive what can wait.", Tone::Warning),
];

const COMPLETIONS: [Line; 5] = [
    ("Quest complete! The Emerald City shines a little brighter.", Tone::Celebrating),
    ("Done and dusted. One less loop spinning in your head.", Tone::Celebrating),
    ("That's a brick laid on the road home. Well walked.", Tone::Celebrating),
    ("The Lion roars with pride. You finished something real.", Tone::Celebrating),
    ("Nicely closed. Take a breath before the next one.", Tone::Encouraging),
];

const DEFAULT_ONBOARDING: Line = (
    "Welcome to Oz. Let's start by getting everything out of your head.",
    Tone::Encouraging,
);

const DEFAULT_INTERVENTION: Line = (
    "Let's pause for a moment before acting on this.",
    Tone::Neutral,
);

fn greeting_pool(status: Status) -> &'static [Line] {
    match status {
        Status::Stable => &STABLE_GREETINGS,
        Status::Elevated => &ELEVATED_GREETINGS,
        Status::Critical => &CRITICAL_GREETINGS,
        Status::Overload => &OVERLOAD_GREETINGS,
    }
}

fn onboarding_line(stage: OnboardingStage) -> Line {
    match stage {
        OnboardingStage::Day1 => DEFAULT_ONBOARDING,
        OnboardingStage::Day2 => (
            "Day two: capture a brain dump whenever a thought tugs at you.",
            Tone::Encouraging,
        ),
        OnboardingStage::Day3 => (
            "Day three: choose your planet. One project gets your best hours.",
            Tone::Neutral,
        ),
        OnboardingStage::Day4 => (
            "Day four: moons orbit the planet. Two side projects, no more.",
            Tone::Neutral,
        ),
        OnboardingStage::Day5 => (
            "Day five: meet your companions. They speak up when load climbs.",
            Tone::Encouraging,
        ),
        OnboardingStage::Day6 => (
            "Day six: when an impulse strikes, let the gate have a look first.",
            Tone::Calming,
        ),
        OnboardingStage::Day7 => (
            "One week on the road! You know the way to the Emerald City now.",
            Tone::Celebrating,
        ),
    }
}

fn intervention_line(key: InterventionKey) -> Line {
    match key {
        InterventionKey::Novelty => (
            "Shiny! But is this a new planet or a distraction? Park it for later.",
            Tone::Warning,
        ),
        InterventionKey::Emotional => (
            "This feels urgent because it feels big. Let the Tin Man sit with it.",
            Tone::Calming,
        ),
        InterventionKey::Fear => (
            "Avoidance wears many masks. The Lion can help you face the real task.",
            Tone::Encouraging,
        ),
        InterventionKey::Logic => (
            "Research can wait for a question. Let the Scarecrow write it down first.",
            Tone::Neutral,
        ),
        InterventionKey::Executive => (
            "Reorganizing feels productive. Dorothy asks: what moves you closer to home?",
            Tone::Neutral,
        ),
        InterventionKey::Legitimate => (
            "This one's on the road. Go ahead.",
            Tone::Encouraging,
        ),
        InterventionKey::Destructive => (
            "Not today. Decisions like this wait until the storm passes.",
            Tone::Warning,
        ),
        InterventionKey::Drift => (
            "You've wandered into the void. Pick one open loop and close it.",
            Tone::Calming,
        ),
        InterventionKey::Overload => (
            "Overload. Nothing new goes in until something comes out.",
            Tone::Warning,
        ),
    }
}

fn status_line(status: Status) -> Line {
    match status {
        Status::Stable => ("All clear. Your load is light.", Tone::Encouraging),
        Status::Elevated => ("Load is climbing. Favor finishing over starting.", Tone::Neutral),
        Status::Critical => ("Load is critical. Protect your planet project.", Tone::Warning),
        Status::Overload => ("Overload. Stop, breathe, and set something down.", Tone::Calming),
    }
}

fn pick<R: Rng + ?Sized>(pool: &'static [Line], rng: &mut R) -> Line {
    *pool.choose(rng).expect("message pools are non-empty")
}

/// Every text a request could resolve to.
pub fn candidates(request: &MessageRequest) -> Vec<&'static str> {
    let status = request.status.unwrap_or_default();
    match request.category {
        MessageCategory::Greeting => greeting_pool(status).iter().map(|l| l.0).collect(),
        MessageCategory::Completion => COMPLETIONS.iter().map(|l| l.0).collect(),
        MessageCategory::Onboarding => vec![resolve_onboarding(request.stage).0],
        MessageCategory::Intervention => vec![resolve_intervention(request.intervention).0],
        MessageCategory::Status => vec![status_line(status).0],
    }
}

fn resolve_onboarding(stage: Option<OnboardingStage>) -> Line {
    stage.map(onboarding_line).unwrap_or(DEFAULT_ONBOARDING)
}

fn resolve_intervention(key: Option<InterventionKey>) -> Line {
    key.map(intervention_line).unwrap_or(DEFAULT_INTERVENTION)
}

/// The fixed intervention message for `key`.
pub fn intervention_message(key: InterventionKey) -> WizardMessage {
    let (text, tone) = intervention_line(key);
    WizardMessage {
        text: text.to_string(),
        tone,
        category: MessageCategory::Intervention,
    }
}

/// Select a wizard message.
///
/// A missing status reads as stable. A missing or unrecognized stage or
/// intervention key resolves to that category's default entry, so every
/// request yields a message.
pub fn get_message<R: Rng + ?Sized>(request: &MessageRequest, rng: &mut R) -> WizardMessage {
    let status = request.status.unwrap_or_default();

    let (text, tone) = match request.category {
        MessageCategory::Greeting => pick(greeting_pool(status), rng),
        MessageCategory::Completion => pick(&COMPLETIONS, rng),
        MessageCategory::Onboarding => resolve_onboarding(request.stage),
        MessageCategory::Intervention => resolve_intervention(request.intervention),
        MessageCategory::Status => status_line(status),
    };

    WizardMessage {
        text: text.to_string(),
        tone,
        category: request.category,
    }
}
