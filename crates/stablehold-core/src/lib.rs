//! # Stablehold Core Library
//!
//! Business logic behind the Stablehold "coming soon" site. Everything the
//! site shows is computed here; the CLI (and any web front end) only decides
//! when to call it and how to render the result.
//!
//! ## Architecture
//!
//! - **Progress**: launch percentage from a fixed epoch, one point per
//!   calendar day in US Eastern time, capped at 100
//! - **Period**: classifies an instant as morning, day, sunset or night
//! - **Selection**: weighted random background choice per period, with the
//!   random source injected by the caller
//! - **Session**: key-value memo so one session keeps one background
//! - **Waitlist**: email signup over Supabase or an in-memory table
//! - **Weather**: OpenWeatherMap current conditions with a canned fallback
//!
//! The pure components never read the clock or a global RNG; callers pass
//! `now` and a [`RandomSource`].

pub mod access_code;
pub mod error;
pub mod period;
pub mod progress;
pub mod selection;
pub mod session;
pub mod storage;
pub mod waitlist;
pub mod weather;

pub use access_code::generate_access_code;
pub use error::{ConfigError, CoreError, Result};
pub use period::{classify, resolve_timezone, Theme, TimePeriod, REFERENCE_TIMEZONE};
pub use progress::{compute_progress, parse_instant, ProgressBand, ProgressReport, ProgressSettings};
pub use selection::{
    choose_background, select, RandomSource, RngSource, Selection, SelectionCatalog,
    WeightedCandidate,
};
pub use session::{FileStore, MemoryStore, SessionBackground, SessionPick, SessionStore};
pub use storage::{Config, Secrets};
pub use waitlist::{
    submit_email, MemoryWaitlist, StoreError, SubmitOutcome, SupabaseStore, WaitlistEntry,
    WaitlistStore,
};
pub use weather::{current_or_fallback, WeatherClient, WeatherError, WeatherReading};
