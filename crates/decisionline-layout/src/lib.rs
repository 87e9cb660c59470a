//! Timeline layout and factor normalization for decision evidence.
//!
//! Everything here is a pure function of its inputs except [`settings`],
//! which reads and writes the TOML settings file.

pub mod error;
pub mod factors;
pub mod filter;
pub mod format;
pub mod links;
pub mod palette;
pub mod placer;
pub mod scale;
pub mod settings;

pub use error::{LayoutError, LayoutResult};
pub use factors::{normalize_factors, FactorShare, Weighted};
pub use filter::{filter_events, DateRange, FilterCriteria};
pub use format::{event_label, format_timestamp, truncate_text, DateStyle};
pub use links::{resolve_links, Link};
pub use palette::{DefaultPalette, EventPalette, EventStyle, PaletteTable, ThemedPalette};
pub use placer::{layout_timeline, LayoutConfig, TimelineNode};
pub use scale::{map_time_to_x, Margin, TimeScale};
pub use settings::TimelineSettings;
