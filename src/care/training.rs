//! The built-in training program and how saved progress is laid over it.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    Difficulty::{self, *},
    TaskCategory::{self, *},
    TrainingProgram, TrainingTask,
};

const WEEKS: &[(u32, &[(&str, &str, &str, TaskCategory, Difficulty)])] = &[
    (
        1,
        &[
            ("w1t1", "Prepare your home for the new puppy", "Get everything ready for your new arrival.", CrateTraining, Easy),
            ("w1t2", "Establish a routine for the first day and night", "Consistency is key.", Obedience, Easy),
            ("w1t3", "Set up the puppy's crate in a good location", "Make the crate a safe and happy place.", CrateTraining, Easy),
            ("w1t4", "Schedule the first vet visit", "Health check and vaccinations.", Socialization, Easy),
        ],
    ),
    (
        2,
        &[
            ("w2t1", "Start potty training", "Establish a regular potty routine.", PottyTraining, Medium),
            ("w2t2", "Establish consistent house rules", "Everyone in the house should be on the same page.", Obedience, Medium),
            ("w2t3", "Practice polite greetings with people", "Prevent jumping up.", Socialization, Medium),
        ],
    ),
    (
        3,
        &[
            ("w3t1", "Introduce the collar and leash", "Make it a positive experience.", Obedience, Easy),
            ("w3t2", "Go for short, positive walks", "Explore the world together.", Socialization, Medium),
            ("w3t3", "Review and set goals for the first month", "Track progress and plan ahead.", Obedience, Medium),
        ],
    ),
];

/// The default program with every task incomplete.
pub fn default_program() -> TrainingProgram {
    let weeks = WEEKS
        .iter()
        .map(|(week, tasks)| {
            let tasks = tasks
                .iter()
                .map(|(id, title, description, category, difficulty)| TrainingTask {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    category: *category,
                    difficulty: *difficulty,
                    completed: false,
                })
                .collect();
            (*week, tasks)
        })
        .collect::<BTreeMap<_, _>>();

    TrainingProgram(weeks)
}

/// Overlays saved completion flags onto `defaults` by task id.
///
/// The shape always comes from `defaults`: tasks the saved program lacks keep
/// their default flag, and saved tasks unknown to the defaults are dropped.
pub fn merge_with_defaults(saved: &TrainingProgram, defaults: &TrainingProgram) -> TrainingProgram {
    let completed: HashMap<&str, bool> = saved
        .tasks()
        .map(|task| (task.id.as_str(), task.completed))
        .collect();

    let weeks = defaults
        .0
        .iter()
        .map(|(week, tasks)| {
            let tasks = tasks
                .iter()
                .map(|task| TrainingTask {
                    completed: completed.get(task.id.as_str()).copied().unwrap_or(task.completed),
                    ..task.clone()
                })
                .collect();
            (*week, tasks)
        })
        .collect();

    TrainingProgram(weeks)
}
