pub mod corruption;
pub mod helpers;
pub mod indexed;
pub mod sequential;
