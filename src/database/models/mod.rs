pub mod assignment;
pub mod employee;
pub mod shift_request;
pub mod shift_slot;

pub use assignment::{Assignment, AssignmentDetail, AssignmentInput, SwapInput};
pub use employee::{AdminFlagInput, Employee, EmployeeInfo, UpdateEmployeeInput};
pub use shift_request::{
    RequestStatus, ShiftRequest, ShiftRequestDetail, ShiftRequestInput, UpdateShiftRequestInput,
};
pub use shift_slot::{ShiftSlot, ShiftSlotInput, UpdateShiftSlotInput};
