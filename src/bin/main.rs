fn main() {
  ordlookup::main()
}
