mod comps_tests;
