mod test_models;
