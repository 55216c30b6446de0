// Core algorithm exports
pub mod distance;
pub mod matcher;
pub mod proximity;

pub use distance::{calculate_bounding_box, haversine_distance_m, is_within_bounding_box};
pub use matcher::{
    titles_overlap, validate_match_pair, ConfirmError, Matcher, DEFAULT_CANDIDATE_LIMIT,
    DEFAULT_MATCH_RADIUS_M,
};
pub use proximity::{rank_by_distance, Located};
