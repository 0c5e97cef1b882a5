pub mod attendance_service;
pub mod employee_service;
pub mod leave_service;
pub mod task_service;
