mod script_runner;
