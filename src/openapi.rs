use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Puppy Tracker API",
        version = "1.0.0",
        description = "Care log for a husky puppy: feeding, potty, sleep, training and the daily checklist"
    ),
    servers(
        (url = "http://localhost:3001", description = "Local development server"),
    ),
    paths(
        // Health
        crate::handlers::health::health_check,

        // Training
        crate::handlers::training_handler::get_training_tasks,
        crate::handlers::training_handler::save_training_tasks,

        // Food
        crate::handlers::food_handler::get_food_entries,
        crate::handlers::food_handler::create_food_entry,
        crate::handlers::food_handler::update_food_entry,
        crate::handlers::food_handler::delete_food_entry,
        crate::handlers::food_handler::delete_all_food_entries,

        // Potty
        crate::handlers::potty_handler::get_potty_entries,
        crate::handlers::potty_handler::create_potty_entry,
        crate::handlers::potty_handler::update_potty_entry,
        crate::handlers::potty_handler::delete_potty_entry,
        crate::handlers::potty_handler::delete_all_potty_entries,

        // Sleep
        crate::handlers::sleep_handler::get_sleep_entries,
        crate::handlers::sleep_handler::create_sleep_entry,
        crate::handlers::sleep_handler::update_sleep_entry,
        crate::handlers::sleep_handler::delete_sleep_entry,

        // Puppy
        crate::handlers::puppy_handler::get_puppy_info,
        crate::handlers::puppy_handler::save_puppy_info,

        // Todo
        crate::handlers::todo_handler::get_todo_entries,
        crate::handlers::todo_handler::save_todo_entry,

        // Sync
        crate::handlers::sync_handler::get_sync,

        // Nap
        crate::handlers::nap_handler::get_active_nap,
        crate::handlers::nap_handler::start_nap,
        crate::handlers::nap_handler::stop_nap,
        crate::handlers::nap_handler::cancel_nap,
    ),
    components(
        schemas(
            crate::models::TrainingTask,
            crate::models::TaskCategory,
            crate::models::Difficulty,
            crate::models::TrainingProgram,
            crate::models::FeedingTime,
            crate::models::FoodEntry,
            crate::models::PottyType,
            crate::models::PottyLocation,
            crate::models::PottyEntry,
            crate::models::SleepQuality,
            crate::models::SleepLocation,
            crate::models::SleepEntry,
            crate::models::TodoItem,
            crate::models::DailyTodoEntry,
            crate::models::PuppyInfo,
            crate::models::ActiveNap,
            crate::models::EndedNap,
            crate::models::SyncSnapshot,
            crate::models::MutationResponse,
            crate::models::HealthStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "training", description = "Weekly training program"),
        (name = "food", description = "Feeding log"),
        (name = "potty", description = "Potty log"),
        (name = "sleep", description = "Sleep log"),
        (name = "puppy", description = "Puppy profile"),
        (name = "todo", description = "Daily schedule checklist"),
        (name = "sync", description = "Aggregate read for clients"),
        (name = "nap", description = "Running nap timer"),
    )
)]
pub struct ApiDoc;
