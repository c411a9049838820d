pub mod agg;
