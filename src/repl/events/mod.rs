//! # Events Module
//!
//! Re-exports all event system components organized by category.

pub mod model_events;
pub mod types;
pub mod view_events;

pub use model_events::ModelEvent;
pub use types::{FieldPath, FocusTarget, ScalarField, StationField};
pub use view_events::ViewEvent;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_event_types_should_be_accessible() {
        let _path = FieldPath::Scalar(ScalarField::ArrivalRate);
        let _station = FieldPath::station(0, StationField::ServerCount);
        let _focus = FocusTarget::Submit;
        let _model_event = ModelEvent::StationAdded { index: 2 };
        let _view_event = ViewEvent::FullRedrawRequired;
    }
}
