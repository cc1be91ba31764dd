mod test_config_validation;
