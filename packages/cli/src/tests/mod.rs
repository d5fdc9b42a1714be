mod commands_tests;
mod logging_tests;
