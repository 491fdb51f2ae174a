//! Base knowledge inserted into an empty store.

use format_core::NewKnowledgeEntry;

const BASE_KNOWLEDGE: &[(&str, &str, &str, i32)] = &[
    ("greeting", "hello|hi|hey|greetings", "Hello! I am FormAT. How can I help you today?", 10),
    ("greeting", "good morning", "Good morning! Hope you have a productive day!", 10),
    ("greeting", "good evening", "Good evening! How can I assist you?", 10),
    (
        "programming",
        "javascript|js|node",
        "JavaScript is a versatile programming language used for web development. It powers both frontend (browsers) and backend (Node.js) applications.",
        8,
    ),
    (
        "programming",
        "python",
        "Python is known for its simplicity and readability. It excels in data science, AI/ML, web development with Django/Flask, and automation.",
        8,
    ),
    (
        "programming",
        "typescript|ts",
        "TypeScript adds static typing to JavaScript, making code more maintainable and catching errors at compile time.",
        8,
    ),
    (
        "programming",
        "react",
        "React is a JavaScript library for building user interfaces with reusable components and efficient rendering via virtual DOM.",
        8,
    ),
    (
        "programming",
        "code|coding|program",
        "Programming is the art of solving problems through code. Start with fundamentals, practice regularly, and build projects!",
        7,
    ),
    (
        "ai",
        "artificial intelligence|ai|machine learning|ml",
        "AI enables machines to learn from data and make decisions. Machine Learning is a subset that focuses on pattern recognition and prediction.",
        9,
    ),
    (
        "ai",
        "neural network|deep learning",
        "Neural networks are computational models inspired by the brain. Deep learning uses multiple layers to learn complex patterns in data.",
        9,
    ),
    (
        "productivity",
        "focus|concentrate|productivity",
        "To improve focus: 1) Use the Pomodoro technique (25 min work, 5 min break), 2) Eliminate distractions, 3) Set clear goals, 4) Take regular breaks.",
        8,
    ),
    (
        "productivity",
        "habit|routine|discipline",
        "Building habits takes consistency. Start small, track progress, and celebrate small wins. Use habit stacking to link new habits to existing ones.",
        8,
    ),
    (
        "productivity",
        "goal|achieve|success",
        "Set SMART goals (Specific, Measurable, Achievable, Relevant, Time-bound). Break big goals into smaller milestones and track your progress.",
        8,
    ),
    (
        "motivation",
        "motivat|inspir|encourage",
        "Remember: Every expert was once a beginner. Progress over perfection! Take it one step at a time and celebrate your journey.",
        9,
    ),
    (
        "motivation",
        "tired|exhausted|burnout",
        "It's okay to rest. Burnout is real. Take breaks, practice self-care, and remember that productivity includes recovery time.",
        9,
    ),
    (
        "learning",
        "learn|study|education",
        "Effective learning: 1) Active recall over passive reading, 2) Spaced repetition, 3) Teach others what you learn, 4) Apply knowledge through projects.",
        8,
    ),
    (
        "learning",
        "book|read|knowledge",
        "Reading expands your mind. Mix fiction for creativity and non-fiction for knowledge. Take notes and apply what you learn.",
        7,
    ),
    (
        "health",
        "health|exercise|fitness",
        "Physical health impacts mental performance. Aim for regular exercise, balanced nutrition, quality sleep, and stress management.",
        7,
    ),
    (
        "health",
        "sleep|rest|tired",
        "Quality sleep is essential for cognitive function. Aim for 7-9 hours, maintain a consistent schedule, and limit screen time before bed.",
        7,
    ),
    (
        "religion",
        "quran|islam|muslim",
        "The Quran is the holy book of Islam, believed to be the word of Allah revealed to Prophet Muhammad. It contains guidance for all aspects of life.",
        8,
    ),
    (
        "religion",
        "prayer|salah|worship",
        "Prayer is a spiritual practice connecting you with the divine. It provides peace, guidance, and a sense of purpose.",
        8,
    ),
    (
        "science",
        "science|research|discovery",
        "Science is the systematic study of the natural world through observation and experimentation. It has transformed our understanding of everything from atoms to galaxies.",
        7,
    ),
    (
        "science",
        "physics|universe|space",
        "Physics explores the fundamental laws governing the universe, from quantum mechanics at the smallest scales to cosmology at the largest.",
        7,
    ),
    (
        "science",
        "biology|life|evolution",
        "Biology is the study of living organisms. Understanding life processes helps us in medicine, agriculture, and environmental conservation.",
        7,
    ),
    (
        "history",
        "history|past|ancient",
        "History teaches us about human civilizations, their triumphs and failures. Learning from the past helps us navigate the present and future.",
        7,
    ),
];

/// The base set. It has no catch-all entry, so queries that match nothing
/// get a creative fallback and are logged for training.
pub fn base_knowledge() -> Vec<NewKnowledgeEntry> {
    BASE_KNOWLEDGE
        .iter()
        .map(|&(category, pattern, response, weight)| {
            NewKnowledgeEntry::new(category, pattern, response, weight)
        })
        .collect()
}
