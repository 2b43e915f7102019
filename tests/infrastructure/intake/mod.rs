mod upload_intake_test;
