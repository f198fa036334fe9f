mod mapper_tests;
mod utils;
