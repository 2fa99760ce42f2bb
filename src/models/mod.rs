//! Data models for Librarium

pub mod book;
pub mod copy;
pub mod enums;
pub mod loan;
pub mod member;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use copy::{BookCopy, CreateCopy, UpdateCopy};
pub use enums::{BookStatus, CopyStatus, LoanStatus, MemberStatus};
pub use loan::{IssueLoan, Loan, RenewLoan, ReturnLoan};
pub use member::{Member, RegisterMember, UpdateMember};
