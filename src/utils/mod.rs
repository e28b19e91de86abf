mod city_generator;

pub use city_generator::generate_city;
