mod storage_backends;
