mod provider_test;
