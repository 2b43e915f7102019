mod local_blob_store_test;
