mod invoices;
mod requests;
