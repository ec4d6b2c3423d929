mod helpers;
mod register_test;
mod shell_test;
