pub mod ambient;
pub mod capability;
pub mod clock;
pub mod config;
pub mod lifecycle;
pub mod loading;
pub mod marker;
pub mod network;
pub mod palette;
pub mod progress;
pub mod random;
pub mod schedule;

pub use capability::{motion_profile, CapabilityProbe, MotionPreference, MotionProfile};
pub use config::{ConfigError, EffectsConfig};
pub use lifecycle::{Effect, EffectGuard};
pub use loading::{LoadingHooks, LoadingSequence, LoadingView};
pub use network::{network_layout, NetworkLayout};
pub use random::{shared, RandomSource, SequenceSource, SharedRandom, SplitMix64};
pub use schedule::{ManualScheduler, ManualTimer, Scheduler};
