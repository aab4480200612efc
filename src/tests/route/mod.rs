mod pages_test;
