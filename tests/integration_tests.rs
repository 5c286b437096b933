//! Integration tests entry point
//!
//! Lets the test harness discover the tests in the integration
//! subdirectory.

mod integration;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_tests_module_loads() {
        integration::init_test_env();
    }
}
