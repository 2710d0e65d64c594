pub mod auc;
pub mod cumulated;
pub mod organ;
pub mod parser;
pub mod radionuclide;
pub mod series;
pub use cumulated::CumulatedActivity;
pub use organ::{OrganTaxonomy, TaxonomyError, ICRP89, TIME_COLUMN};
pub use radionuclide::{Radionuclide, RadionuclideRegistry, DEFAULT_REGISTRY, RADIONUCLIDES};
pub use series::{OrganInput, TimeActivitySeries, TimeActivityTable};
