//! Unit test modules for the scheduler component

mod timer_test;
