
use std::collections::BTreeSet;

use tracing::warn;

use super::{Channel,ChannelIndex,Network,PathPolicy};
use crate::error::Error;
use crate::source_location;
use crate::topology::Shape;
use crate::topology::cartesian::CartesianData;

///A network based on having stored the list of channels at each node.
///It is used
///* to build the ring, torus and star networks (see `from_shape`),
///* and to build any other undirected network from a list of links.
#[derive(Debug)]
pub struct NeighboursLists
{
	///channels[c] = the two endpoints of channel c.
	channels: Vec<Channel>,
	///incident[node] = the channels at node, in the order they were given.
	incident: Vec<Vec<ChannelIndex>>,
	///How `enumerate_paths` chooses the candidates.
	path_policy: PathPolicy,
}

impl Network for NeighboursLists
{
	fn num_nodes(&self) -> usize
	{
		self.incident.len()
	}
	fn num_channels(&self) -> usize
	{
		self.channels.len()
	}
	fn channels_at(&self, address:usize) -> Result<&[ChannelIndex],Error>
	{
		self.incident.get(address).map(|list|list.as_slice()).ok_or_else(||Error::unknown_address(source_location!(),address,self.incident.len()))
	}
	fn channel(&self, index:ChannelIndex) -> Result<&Channel,Error>
	{
		self.channels.get(index).ok_or_else(||Error::unknown_channel(source_location!(),index))
	}
	fn enumerate_paths(&self, source:usize, destination:usize) -> Result<Vec<Vec<ChannelIndex>>,Error>
	{
		self.check_address(source)?;
		self.check_address(destination)?;
		let paths=match self.path_policy
		{
			PathPolicy::Shortest => self.shortest_paths(source,destination),
			PathPolicy::Simple{max_length} => self.simple_paths(source,destination,max_length),
		};
		if paths.is_empty()
		{
			return Err(Error::no_path(source_location!(),source,destination));
		}
		Ok(paths)
	}
}

impl NeighboursLists
{
	///Build a network with `num_nodes` nodes and a channel for each link `(a,b)`.
	///Self-loops and repeated links are dropped, so channel indices follow the order of the first appearance of each link.
	pub fn new(num_nodes:usize, links:&[(usize,usize)]) -> Result<NeighboursLists,Error>
	{
		let mut channels=Vec::with_capacity(links.len());
		let mut incident=vec![Vec::new();num_nodes];
		let mut seen=BTreeSet::new();
		let mut dropped=0;
		for &(a,b) in links
		{
			for &endpoint in [a,b].iter()
			{
				if endpoint>=num_nodes
				{
					return Err(Error::unknown_address(source_location!(),endpoint,num_nodes));
				}
			}
			if a==b || !seen.insert((a.min(b),a.max(b)))
			{
				dropped+=1;
				continue;
			}
			let index=channels.len();
			channels.push(Channel::new(a,b));
			incident[a].push(index);
			incident[b].push(index);
		}
		if dropped>0
		{
			warn!(dropped,"self-loops or repeated links were ignored while building the network");
		}
		Ok(NeighboursLists{
			channels,
			incident,
			path_policy: PathPolicy::default(),
		})
	}
	pub fn with_path_policy(mut self, path_policy:PathPolicy) -> NeighboursLists
	{
		self.path_policy=path_policy;
		self
	}
	///Build the network described by a shape.
	pub fn from_shape(shape:&Shape) -> Result<NeighboursLists,Error>
	{
		match shape
		{
			&Shape::Ring{k} => NeighboursLists::ring(k),
			&Shape::Torus{ref cartesian_data} => NeighboursLists::torus(cartesian_data.sides[0],cartesian_data.sides[1]),
			&Shape::Star{hubs,spokes} => NeighboursLists::star(hubs,spokes),
		}
	}
	///A cycle `0 - 1 - ... - (k-1) - 0`.
	pub fn ring(k:usize) -> Result<NeighboursLists,Error>
	{
		if k==0
		{
			return Err(Error::invalid_shape(source_location!(),"a ring needs at least one node".to_string()));
		}
		let links=unique_links((0..k).map(|i|(i,(i+1)%k)));
		NeighboursLists::new(k,&links)
	}
	///A `k1 x k2` torus. The node `(x,y)` has address `x+k1*y` and links to `(x±1,y)` and `(x,y±1)`, wrapping around.
	pub fn torus(k1:usize, k2:usize) -> Result<NeighboursLists,Error>
	{
		if k1==0 || k2==0
		{
			return Err(Error::invalid_shape(source_location!(),format!("a torus cannot have a side of zero, got {}x{}",k1,k2)));
		}
		let cartesian_data=CartesianData::new(&[k1,k2]);
		let mut links=Vec::with_capacity(2*cartesian_data.size);
		for address in 0..cartesian_data.size
		{
			let [x,y]=cartesian_data.unpack(address);
			links.push((address,cartesian_data.pack([(x+1)%k1,y])));
			links.push((address,cartesian_data.pack([x,(y+1)%k2])));
		}
		NeighboursLists::new(cartesian_data.size,&unique_links(links.into_iter()))
	}
	///A star with `hubs` central nodes `0..hubs`, all linked among them, and `spokes` outer nodes `hubs..hubs+spokes`, each linked to every hub.
	pub fn star(hubs:usize, spokes:usize) -> Result<NeighboursLists,Error>
	{
		if hubs==0
		{
			return Err(Error::invalid_shape(source_location!(),"a star needs at least one hub".to_string()));
		}
		let n=hubs+spokes;
		let mut links=vec![];
		for hub in 0..hubs
		{
			for other in hub+1..n
			{
				links.push((hub,other));
			}
		}
		NeighboursLists::new(n,&links)
	}
	///Breadth First Search to compute distances in hops from a node to all others.
	///Unreachable nodes get `usize::MAX`.
	pub fn bfs(&self, origin:usize) -> Vec<usize>
	{
		let n=self.num_nodes();
		let mut distance=vec![usize::MAX;n];
		if origin>=n
		{
			return distance;
		}
		distance[origin]=0;
		let mut queue=vec![0;n];
		let mut queue_read_index=0;//Next to read
		let mut queue_write_index=1;//Next to write
		queue[0]=origin;
		while queue_read_index<queue_write_index
		{
			let best=queue[queue_read_index];
			queue_read_index+=1;
			let alt=distance[best]+1;
			for &channel in self.incident[best].iter()
			{
				if let Some(neighbour)=self.channels[channel].far_endpoint(best)
				{
					if alt<distance[neighbour]
					{
						distance[neighbour]=alt;
						queue[queue_write_index]=neighbour;
						queue_write_index+=1;
					}
				}
			}
		}
		distance
	}
	///Every path from `source` that descends one hop at each step in the distance to `destination`.
	fn shortest_paths(&self, source:usize, destination:usize) -> Vec<Vec<ChannelIndex>>
	{
		let distance=self.bfs(destination);
		let mut paths=vec![];
		if distance[source]==usize::MAX
		{
			return paths;
		}
		let mut path=Vec::with_capacity(distance[source]);
		self.descend(source,&distance,&mut path,&mut paths);
		paths
	}
	fn descend(&self, node:usize, distance:&[usize], path:&mut Vec<ChannelIndex>, paths:&mut Vec<Vec<ChannelIndex>>)
	{
		if distance[node]==0
		{
			paths.push(path.clone());
			return;
		}
		for &channel in self.incident[node].iter()
		{
			if let Some(next)=self.channels[channel].far_endpoint(node)
			{
				if distance[next]+1==distance[node]
				{
					path.push(channel);
					self.descend(next,distance,path,paths);
					path.pop();
				}
			}
		}
	}
	///Every path from `source` to `destination` without repeated nodes and with at most `max_length` channels.
	fn simple_paths(&self, source:usize, destination:usize, max_length:Option<usize>) -> Vec<Vec<ChannelIndex>>
	{
		let mut visited=vec![false;self.num_nodes()];
		visited[source]=true;
		let mut path=vec![];
		let mut paths=vec![];
		self.explore(source,destination,max_length,&mut visited,&mut path,&mut paths);
		paths
	}
	fn explore(&self, node:usize, destination:usize, max_length:Option<usize>, visited:&mut Vec<bool>, path:&mut Vec<ChannelIndex>, paths:&mut Vec<Vec<ChannelIndex>>)
	{
		if node==destination
		{
			paths.push(path.clone());
			return;
		}
		if max_length.map_or(false,|limit|path.len()>=limit)
		{
			return;
		}
		for &channel in self.incident[node].iter()
		{
			if let Some(next)=self.channels[channel].far_endpoint(node)
			{
				if !visited[next]
				{
					visited[next]=true;
					path.push(channel);
					self.explore(next,destination,max_length,visited,path,paths);
					path.pop();
					visited[next]=false;
				}
			}
		}
	}
}

///Remove self-loops and repeated links that wrapping around small sides produces, keeping the first appearance.
fn unique_links<I:Iterator<Item=(usize,usize)>>(links:I) -> Vec<(usize,usize)>
{
	let mut seen=BTreeSet::new();
	links.filter(|&(a,b)|a!=b && seen.insert((a.min(b),a.max(b)))).collect()
}
