pub mod presenter;

pub use presenter::{MapPresenter, MarkerIcon, ReportMarker, ReportPopup, SelfMarker};
