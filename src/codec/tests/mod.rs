mod tests_store;
