pub mod assignment;
pub mod employee;
pub mod shift_request;
pub mod shift_slot;

pub use assignment::AssignmentRepository;
pub use employee::EmployeeRepository;
pub use shift_request::ShiftRequestRepository;
pub use shift_slot::ShiftSlotRepository;
