pub mod food;
pub mod nap;
pub mod potty;
pub mod puppy;
pub mod record;
pub mod response;
pub mod sleep;
pub mod sync;
pub mod todo;
pub mod training;

pub use food::{FeedingTime, FoodEntry};
pub use nap::{ActiveNap, EndedNap};
pub use potty::{PottyEntry, PottyLocation, PottyType};
pub use puppy::PuppyInfo;
pub use record::{Collection, Record, Singleton};
pub use response::{HealthStatus, MutationResponse, SavedResponse};
pub use sleep::{SleepEntry, SleepLocation, SleepQuality};
pub use sync::SyncSnapshot;
pub use todo::{DailyTodoEntry, TodoItem};
pub use training::{Difficulty, TaskCategory, TrainingProgram, TrainingTask};
