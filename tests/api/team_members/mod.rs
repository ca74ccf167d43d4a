mod retrieve;
