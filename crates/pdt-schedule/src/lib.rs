pub mod error;
pub mod propagation;
pub mod schedule;

pub use error::{Result, ScheduleError};
pub use propagation::{
    DateShiftProposal, LinkType, LocationSpan, LogisticsKind, LogisticsRequest,
    ReinforcementAssignment, ScheduleLink, ShiftReason, location_spans, logistics_target,
    propose_logistics_shifts, propose_reinforcement_shifts,
};
pub use schedule::Schedule;
