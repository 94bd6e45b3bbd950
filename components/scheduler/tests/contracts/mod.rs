//! Contract test modules for the scheduler component

mod contract_test;
