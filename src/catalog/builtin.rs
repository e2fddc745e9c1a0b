//! Lessons shipped with the app.

use super::lesson::{LessonRecord, QuizQuestion};

fn lesson(
    id: &str,
    title: &str,
    category: &str,
    summary: &str,
    content: &str,
    duration_minutes: u32,
) -> LessonRecord {
    LessonRecord {
        id: id.to_string(),
        title: title.to_string(),
        category: category.to_string(),
        summary: summary.to_string(),
        content: content.to_string(),
        duration_minutes,
        is_premium: false,
        quiz: Vec::new(),
    }
}

/// Builtin lessons in display order.
pub fn lessons() -> Vec<LessonRecord> {
    vec![
        lesson(
            "two-minute-rule",
            "The Two-Minute Rule",
            "productivity",
            "Start habits so small you can't say no.",
            "If a task takes less than two minutes, do it now. When building a new \
             habit, scale it down until the first step takes two minutes or less: \
             \"read before bed\" becomes \"read one page\".",
            3,
        )
        .with_question(QuizQuestion::new(
            "A task takes about one minute. What does the rule suggest?",
            ["Schedule it for later", "Do it immediately", "Delegate it"],
            1,
        ))
        .with_question(
            QuizQuestion::new(
                "How should \"run every morning\" be scaled down?",
                ["Run a marathon", "Put on running shoes", "Buy a treadmill"],
                1,
            )
            .with_explanation("The first step should take two minutes or less."),
        ),
        lesson(
            "active-listening",
            "Active Listening",
            "communication",
            "Hear what is meant, not just what is said.",
            "Give full attention, reflect back what you heard in your own words, and \
             ask open questions before offering your view.",
            4,
        )
        .with_question(QuizQuestion::new(
            "Which response shows active listening?",
            [
                "\"That reminds me of my week...\"",
                "\"So the deadline is what worries you most?\"",
                "\"You should just quit.\"",
            ],
            1,
        ))
        .with_question(QuizQuestion::new(
            "Open questions usually start with...",
            ["Is", "Do", "What or how"],
            2,
        )),
        lesson(
            "pomodoro",
            "Pomodoro Basics",
            "productivity",
            "Work in focused 25-minute sprints.",
            "Pick one task, set a timer for 25 minutes, work until it rings, then take \
             a 5-minute break. After four rounds take a longer break.",
            3,
        )
        .with_question(QuizQuestion::new(
            "How long is a standard pomodoro?",
            ["10 minutes", "25 minutes", "60 minutes"],
            1,
        ))
        .with_question(QuizQuestion::new(
            "When do you take the long break?",
            ["After every round", "After four rounds", "Never"],
            1,
        )),
        lesson(
            "negotiation-anchoring",
            "Anchoring in Negotiation",
            "communication",
            "Why the first number matters.",
            "The first concrete number in a negotiation pulls the outcome toward it. \
             Anchor with a well-researched ambitious figure and justify it.",
            5,
        )
        .premium()
        .with_question(QuizQuestion::new(
            "What is an anchor?",
            [
                "The final agreed price",
                "The first number that frames the discussion",
                "A walk-away threshold",
            ],
            1,
        )),
        lesson(
            "spaced-repetition",
            "Spaced Repetition",
            "learning",
            "Review right before you forget.",
            "Memories fade on a curve. Reviewing at growing intervals (1 day, 3 days, \
             a week) keeps material fresh with far less total study time.",
            4,
        )
        .with_question(QuizQuestion::new(
            "Review intervals should...",
            ["Stay fixed", "Grow over time", "Shrink over time"],
            1,
        )),
        lesson(
            "feynman-technique",
            "The Feynman Technique",
            "learning",
            "Explain it simply to understand it deeply.",
            "Write the concept down, explain it as if teaching a child, find the gaps \
             where you stumble, then go back to the source and simplify again.",
            4,
        )
        .with_question(QuizQuestion::new(
            "What do you do when your explanation stumbles?",
            ["Skip that part", "Return to the source material", "Use jargon"],
            1,
        )),
        lesson(
            "deep-work",
            "Deep Work Blocks",
            "productivity",
            "Protect long stretches of undistracted focus.",
            "Schedule 90-minute blocks with notifications off and a single goal. Treat \
             them like meetings you cannot move.",
            6,
        )
        .premium()
        .with_question(QuizQuestion::new(
            "What belongs in a deep work block?",
            ["Email triage", "One demanding goal", "Back-to-back calls"],
            1,
        )),
        lesson(
            "public-speaking-pauses",
            "The Power of the Pause",
            "communication",
            "Silence makes your point land.",
            "Replace filler words with a short pause. Pause before key points and after \
             questions to signal confidence and give listeners time to think.",
            3,
        )
        .premium()
        .with_question(QuizQuestion::new(
            "What should replace filler words?",
            ["Faster speech", "A short pause", "Louder volume"],
            1,
        )),
    ]
}
