mod tests_flight;
