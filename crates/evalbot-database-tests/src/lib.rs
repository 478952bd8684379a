mod testcase;

#[cfg(test)]
mod repository;
#[cfg(test)]
mod review;

pub use testcase::{db_test_case, db_test_case_pg};
