pub mod admin;
pub mod attendance;
pub mod employee;
pub mod leave;
pub mod task;

pub use admin::Admin;
pub use attendance::CheckInOut;
pub use employee::Employee;
pub use leave::{Conge, ETAT_EN_ATTENTE, ETAT_REFUSEE, ETAT_VALIDEE};
pub use task::{Tache, ETAT_COMPLETE};
